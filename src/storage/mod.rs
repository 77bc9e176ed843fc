pub mod traits;
pub mod fs;
pub mod memory;
pub mod s3;

pub use traits::{ObjectStore, StorageError, NOT_FOUND_CODE};
pub use fs::FsObjectStore;
pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;
