//! In-process replicated log.

use crate::{
    errors::{Result, StorageError},
    log::{LocalIndex, LogEntry},
    traits::Store,
    types::{Document, GetOptions, LoadDepth, VersionHandle},
};
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::RwLock;
use tracing::debug;

/// Append-only log kept in memory and shared between replica handles
///
/// Each handle owns a local index. A handle sees its own appends immediately
/// but only observes appends made through other replicas after
/// [`Store::load`], which is how a peer-replicated log behaves.
pub struct MemoryLogStore {
    name: String,
    log: Arc<RwLock<Vec<LogEntry>>>,
    index: RwLock<LocalIndex>,
    closed: AtomicBool,
}

impl MemoryLogStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            log: Arc::new(RwLock::new(Vec::new())),
            index: RwLock::new(LocalIndex::default()),
            closed: AtomicBool::new(false),
        }
    }

    /// Open another replica of the same log with an empty local view
    pub fn replica(&self) -> Self {
        Self {
            name: self.name.clone(),
            log: Arc::clone(&self.log),
            index: RwLock::new(LocalIndex::default()),
            closed: AtomicBool::new(false),
        }
    }

    /// Number of entries in the shared log
    pub async fn len(&self) -> usize {
        self.log.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::Closed);
        }
        Ok(())
    }

    async fn append(&self, build: impl FnOnce(u64) -> LogEntry) -> Result<VersionHandle> {
        self.ensure_open()?;

        let entry = {
            let mut log = self.log.write().await;
            let entry = build(log.len() as u64 + 1);
            log.push(entry.clone());
            entry
        };

        let encoded = entry.encode()?;
        self.index.write().await.apply(&entry);

        debug!(seq = entry.seq, key = %entry.key(), "Appended entry to memory log");
        Ok(entry.version(&encoded))
    }
}

#[async_trait]
impl Store for MemoryLogStore {
    async fn put(&self, document: Document) -> Result<VersionHandle> {
        self.append(|seq| LogEntry::put(seq, document)).await
    }

    async fn get(&self, key: &str, options: GetOptions) -> Result<Vec<Document>> {
        self.ensure_open()?;
        Ok(self.index.read().await.query(key, options))
    }

    async fn load(&self, depth: LoadDepth) -> Result<()> {
        self.ensure_open()?;

        let log = self.log.read().await;
        let mut index = self.index.write().await;
        match depth {
            LoadDepth::Unbounded => index.rebuild(log.iter()),
            LoadDepth::Latest(n) => {
                let start = log.len().saturating_sub(n);
                for entry in &log[start..] {
                    index.apply(entry);
                }
            }
        }

        debug!(entries = log.len(), ?depth, "Loaded memory log");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<VersionHandle> {
        self.append(|seq| LogEntry::tombstone(seq, key)).await
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(StorageError::AlreadyClosed);
        }
        debug!(address = %self.address(), "Closed memory log handle");
        Ok(())
    }

    fn address(&self) -> String {
        format!("/asteroid/memory/{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, data: &str) -> Document {
        Document {
            id: id.to_string(),
            data: data.to_string(),
        }
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = MemoryLogStore::new("default");
        store.put(doc("a", "1")).await.unwrap();

        let found = store.get("a", GetOptions::exact()).await.unwrap();
        assert_eq!(found, vec![doc("a", "1")]);
    }

    #[tokio::test]
    async fn test_versions_are_sequential() {
        let store = MemoryLogStore::new("default");
        let v1 = store.put(doc("a", "1")).await.unwrap();
        let v2 = store.put(doc("a", "2")).await.unwrap();

        assert_eq!(v1.seq + 1, v2.seq);
        assert_ne!(v1.hash, v2.hash);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_replica_is_stale_until_load() {
        let writer = MemoryLogStore::new("default");
        let reader = writer.replica();

        writer.put(doc("a", "1")).await.unwrap();
        assert!(reader.get("a", GetOptions::exact()).await.unwrap().is_empty());

        reader.load(LoadDepth::Unbounded).await.unwrap();
        assert_eq!(
            reader.get("a", GetOptions::exact()).await.unwrap(),
            vec![doc("a", "1")]
        );
    }

    #[tokio::test]
    async fn test_partial_load_replays_latest_entries_only() {
        let writer = MemoryLogStore::new("default");
        let reader = writer.replica();

        writer.put(doc("a", "1")).await.unwrap();
        writer.put(doc("b", "1")).await.unwrap();

        reader.load(LoadDepth::Latest(1)).await.unwrap();
        assert!(reader.get("a", GetOptions::exact()).await.unwrap().is_empty());
        assert_eq!(reader.get("b", GetOptions::exact()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_appends_tombstone() {
        let store = MemoryLogStore::new("default");
        store.put(doc("a", "1")).await.unwrap();
        store.delete("a").await.unwrap();

        assert!(store.get("a", GetOptions::exact()).await.unwrap().is_empty());
        assert_eq!(store.len().await, 2);

        store.load(LoadDepth::Unbounded).await.unwrap();
        assert!(store.get("a", GetOptions::exact()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_close_twice_fails() {
        let store = MemoryLogStore::new("default");
        store.close().await.unwrap();

        assert!(matches!(
            store.close().await,
            Err(StorageError::AlreadyClosed)
        ));
        assert!(matches!(
            store.put(doc("a", "1")).await,
            Err(StorageError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_address_names_the_log() {
        let store = MemoryLogStore::new("notes");
        assert_eq!(store.address(), "/asteroid/memory/notes");
        assert_eq!(store.replica().address(), store.address());
    }
}
