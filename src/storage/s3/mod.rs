mod store;

pub use store::S3ObjectStore;
