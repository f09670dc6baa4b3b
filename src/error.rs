//! Storage failure kinds
//!
//! Nothing in this crate surfaces these to presentation code: the store
//! degrades to an empty collection on load and logs on save. They exist so
//! backends can say *why* something failed and tests can check it.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend is missing, disabled, or refused the operation
    /// (quota exceeded, permission denied, I/O error).
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The stored value does not parse into a list of items
    #[error("corrupt persisted data: {0}")]
    CorruptPersistedData(#[from] serde_json::Error),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::StorageUnavailable(err.to_string())
    }
}
