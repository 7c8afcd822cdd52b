//! RocksDB-backed persistent log.

use crate::{
    errors::{Result, StorageError},
    log::{LocalIndex, LogEntry},
    traits::Store,
    types::{Document, GetOptions, LoadDepth, VersionHandle},
};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, IteratorMode, Options, DB};
use std::{
    path::Path,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};
use tokio::sync::RwLock;
use tracing::debug;

/// Operation log: big-endian sequence number → bincode [`LogEntry`]
pub const CF_OPLOG: &str = "oplog";

/// Persistent single-replica log stored in RocksDB
///
/// Entries are never rewritten. The local index lives in memory and is
/// rebuilt from the column family by [`Store::load`].
pub struct RocksDbLogStore {
    name: String,
    db: RwLock<Option<Arc<DB>>>,
    last_seq: AtomicU64,
    index: RwLock<LocalIndex>,
}

impl RocksDbLogStore {
    /// Open the log at `path`, creating it if it doesn't exist
    pub fn open<P: AsRef<Path>>(path: P, name: impl Into<String>) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let db = DB::open_cf(&opts, &path, [CF_OPLOG])
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let last_seq = Self::read_last_seq(&db)?;

        debug!(path = ?path.as_ref(), last_seq, "Opened RocksDB log");

        Ok(Self {
            name: name.into(),
            db: RwLock::new(Some(Arc::new(db))),
            last_seq: AtomicU64::new(last_seq),
            index: RwLock::new(LocalIndex::default()),
        })
    }

    fn oplog(db: &DB) -> Result<&ColumnFamily> {
        db.cf_handle(CF_OPLOG)
            .ok_or_else(|| StorageError::Database(format!("missing column family {}", CF_OPLOG)))
    }

    fn read_last_seq(db: &DB) -> Result<u64> {
        let cf = Self::oplog(db)?;
        match db.iterator_cf(cf, IteratorMode::End).next() {
            Some(item) => {
                let (key, _) = item.map_err(|e| StorageError::Database(e.to_string()))?;
                decode_seq(&key)
            }
            None => Ok(0),
        }
    }

    /// Read the newest `limit` entries (all when `None`) in log order
    fn read_entries(db: &DB, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let cf = Self::oplog(db)?;
        let mut entries = Vec::new();

        let mode = if limit.is_some() {
            IteratorMode::End
        } else {
            IteratorMode::Start
        };
        for item in db.iterator_cf(cf, mode).take(limit.unwrap_or(usize::MAX)) {
            let (_, value) = item.map_err(|e| StorageError::Database(e.to_string()))?;
            entries.push(LogEntry::decode(&value)?);
        }

        if limit.is_some() {
            entries.reverse();
        }
        Ok(entries)
    }

    async fn handle(&self) -> Result<Arc<DB>> {
        self.db.read().await.clone().ok_or(StorageError::Closed)
    }

    async fn append(&self, build: impl FnOnce(u64) -> LogEntry) -> Result<VersionHandle> {
        let db = self.handle().await?;
        let seq = self.last_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let entry = build(seq);
        let encoded = entry.encode()?;

        db.put_cf(Self::oplog(&db)?, seq.to_be_bytes(), &encoded)
            .map_err(|e| StorageError::Database(e.to_string()))?;
        self.index.write().await.apply(&entry);

        debug!(seq, key = %entry.key(), "Appended entry to RocksDB log");
        Ok(entry.version(&encoded))
    }
}

fn decode_seq(key: &[u8]) -> Result<u64> {
    let bytes: [u8; 8] = key
        .try_into()
        .map_err(|_| StorageError::Deserialization(format!("bad oplog key length {}", key.len())))?;
    Ok(u64::from_be_bytes(bytes))
}

#[async_trait]
impl Store for RocksDbLogStore {
    async fn put(&self, document: Document) -> Result<VersionHandle> {
        self.append(|seq| LogEntry::put(seq, document)).await
    }

    async fn get(&self, key: &str, options: GetOptions) -> Result<Vec<Document>> {
        self.handle().await?;
        Ok(self.index.read().await.query(key, options))
    }

    async fn load(&self, depth: LoadDepth) -> Result<()> {
        let db = self.handle().await?;

        match depth {
            LoadDepth::Unbounded => {
                let entries = Self::read_entries(&db, None)?;
                self.index.write().await.rebuild(entries.iter());
                debug!(entries = entries.len(), "Loaded RocksDB log");
            }
            LoadDepth::Latest(n) => {
                let entries = Self::read_entries(&db, Some(n))?;
                let mut index = self.index.write().await;
                for entry in &entries {
                    index.apply(entry);
                }
                debug!(entries = entries.len(), "Partially loaded RocksDB log");
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<VersionHandle> {
        self.append(|seq| LogEntry::tombstone(seq, key)).await
    }

    async fn close(&self) -> Result<()> {
        match self.db.write().await.take() {
            Some(_) => {
                debug!(address = %self.address(), "Closed RocksDB log");
                Ok(())
            }
            None => Err(StorageError::AlreadyClosed),
        }
    }

    fn address(&self) -> String {
        format!("/asteroid/rocksdb/{}", self.name)
    }
}
