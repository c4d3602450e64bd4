pub mod adapter;
pub mod file;
pub mod memory;
pub mod traits;

pub use adapter::{StorageAdapter, DEFAULT_KEY};
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use traits::StorageBackend;
