//! Store capability definition.

use crate::{
    errors::Result,
    types::{Document, GetOptions, LoadDepth, VersionHandle},
};
use async_trait::async_trait;

/// Append-only, keyed document log
///
/// Implementations are replicas of an eventually-consistent log: a handle's
/// local view may lag behind writes made through other handles until
/// [`load`](Store::load) is called. Every mutation is an append; the latest
/// entry for a key wins and a tombstone hides the key.
///
/// The trait is object safe so one handle can be constructed at startup and
/// shared as `Arc<dyn Store>`.
#[async_trait]
pub trait Store: Send + Sync {
    /// Append a document version
    async fn put(&self, document: Document) -> Result<VersionHandle>;

    /// Query the local view by key
    ///
    /// Returns every current document for the exact key, or for every key
    /// containing `key` when `options.partial_match` is set.
    async fn get(&self, key: &str, options: GetOptions) -> Result<Vec<Document>>;

    /// Synchronize the local view with the log
    async fn load(&self, depth: LoadDepth) -> Result<()>;

    /// Append a tombstone for `key`
    async fn delete(&self, key: &str) -> Result<VersionHandle>;

    /// Release the handle
    ///
    /// A second call fails with [`StorageError::AlreadyClosed`](crate::StorageError::AlreadyClosed).
    async fn close(&self) -> Result<()>;

    /// Opaque address identifying the log
    fn address(&self) -> String;
}
