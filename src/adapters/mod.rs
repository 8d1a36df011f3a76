// Adapters layer: concrete implementations for external systems.

pub mod archive_sink;
pub mod sqlite_sink;
pub mod storage;

pub use archive_sink::ArchiveSink;
pub use sqlite_sink::SqliteSink;
pub use storage::LocalStorage;
