//! Storage error types.

use std::time::Duration;
use thiserror::Error;

/// Errors raised by a [`Store`](crate::Store) backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store handle has been closed
    #[error("Store is closed")]
    Closed,

    /// `close` was called on a handle that is already closed
    #[error("Store already closed")]
    AlreadyClosed,

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StorageError {
    /// True when the handle can no longer serve requests
    pub fn is_closed(&self) -> bool {
        matches!(self, StorageError::Closed | StorageError::AlreadyClosed)
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors raised by the [`DocumentRepository`](crate::DocumentRepository)
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying store is closed or not initialized
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] StorageError),

    /// The entity could not be encoded
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// A stored payload could not be decoded into the requested type
    #[error("Decode failed: {0}")]
    DecodeFailed(String),

    /// Appending to the log failed
    #[error("Write failed during {op} of {key}: {source}")]
    WriteFailed {
        op: &'static str,
        key: String,
        #[source]
        source: StorageError,
    },

    /// Synchronizing or querying the local view failed
    #[error("Load failed while reading {key}: {source}")]
    LoadFailed {
        key: String,
        #[source]
        source: StorageError,
    },

    /// No current document for the key
    #[error("Document not found: {0}")]
    NotFound(String),

    /// More than one current document for an exact key
    #[error("Ambiguous key {key}: {count} documents match")]
    AmbiguousKey { key: String, count: usize },

    /// The operation did not finish within the caller's deadline
    #[error("{op} of {key} timed out after {timeout:?}")]
    Timeout {
        op: &'static str,
        key: String,
        timeout: Duration,
    },

    /// The caller canceled the operation
    #[error("{op} of {key} was canceled")]
    Canceled { op: &'static str, key: String },
}

impl RepositoryError {
    /// Classify a store failure raised while appending
    pub(crate) fn write(op: &'static str, key: &str, source: StorageError) -> Self {
        if source.is_closed() {
            RepositoryError::StoreUnavailable(source)
        } else {
            RepositoryError::WriteFailed {
                op,
                key: key.to_string(),
                source,
            }
        }
    }

    /// Classify a store failure raised while loading or querying
    pub(crate) fn load(key: &str, source: StorageError) -> Self {
        if source.is_closed() {
            RepositoryError::StoreUnavailable(source)
        } else {
            RepositoryError::LoadFailed {
                key: key.to_string(),
                source,
            }
        }
    }

    /// True for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_))
    }
}
