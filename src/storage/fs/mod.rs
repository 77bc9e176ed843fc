mod store;

pub use store::FsObjectStore;
