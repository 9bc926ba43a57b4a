// Key-value storage port
//
// Everything EduLog remembers between runs goes through this trait: the
// configured spreadsheet endpoint and the full record list. Business logic
// never touches files directly.

use thiserror::Error;

mod file_store;
mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Key under which the spreadsheet endpoint URL is stored (plain string).
pub const SHEET_URL_KEY: &str = "edulog_sheet_url";

/// Key under which the serialized record list is stored (JSON array).
pub const RECORDS_KEY: &str = "edulog_records";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("잘못된 저장소 키: {key}")]
    InvalidKey { key: String },

    #[error("'{key}' 읽기 실패: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{key}' 쓰기 실패: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Synchronous get/set storage keyed by string.
///
/// A `set` either fully replaces the previous value or fails and leaves it
/// untouched. There is no versioning: the last write wins.
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when nothing was ever stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
