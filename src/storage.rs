pub mod backend;
pub use backend::StorageBackend;
pub mod http;
pub use http::HttpBackend;
pub mod local;
pub use local::LocalBackend;
pub mod memory;
pub use memory::MemoryBackend;
