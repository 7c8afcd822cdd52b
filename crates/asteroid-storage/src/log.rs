//! Log entries and the local index both backends reconcile them into.

use crate::{
    errors::{Result, StorageError},
    types::{Document, GetOptions, VersionHandle},
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// A single operation recorded in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Put(Document),
    Delete { key: String },
}

/// An immutable log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub seq: u64,
    pub op: Operation,
}

impl LogEntry {
    pub fn put(seq: u64, document: Document) -> Self {
        Self {
            seq,
            op: Operation::Put(document),
        }
    }

    pub fn tombstone(seq: u64, key: &str) -> Self {
        Self {
            seq,
            op: Operation::Delete {
                key: key.to_string(),
            },
        }
    }

    /// Key this entry applies to
    pub fn key(&self) -> &str {
        match &self.op {
            Operation::Put(document) => &document.id,
            Operation::Delete { key } => key,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| StorageError::Deserialization(e.to_string()))
    }

    /// Content address of the encoded entry
    pub fn version(&self, encoded: &[u8]) -> VersionHandle {
        VersionHandle {
            seq: self.seq,
            hash: hex::encode(Sha256::digest(encoded)),
        }
    }
}

/// Local view of the log: the newest entry seen for every key
///
/// Applying an entry only takes effect when its sequence number is newer than
/// what the index already holds for that key, so replays are idempotent and
/// entries may arrive in any order.
#[derive(Debug, Default)]
pub struct LocalIndex {
    entries: HashMap<String, (u64, Option<Document>)>,
}

impl LocalIndex {
    pub fn apply(&mut self, entry: &LogEntry) {
        if let Some((seq, _)) = self.entries.get(entry.key()) {
            if *seq >= entry.seq {
                return;
            }
        }

        let value = match &entry.op {
            Operation::Put(document) => Some(document.clone()),
            Operation::Delete { .. } => None,
        };
        self.entries
            .insert(entry.key().to_string(), (entry.seq, value));
    }

    /// Rebuild the index from a complete log
    pub fn rebuild<'a>(&mut self, entries: impl IntoIterator<Item = &'a LogEntry>) {
        self.entries.clear();
        for entry in entries {
            self.apply(entry);
        }
    }

    pub fn query(&self, key: &str, options: GetOptions) -> Vec<Document> {
        if options.partial_match {
            let mut matches: Vec<(u64, Document)> = self
                .entries
                .iter()
                .filter(|(k, _)| k.contains(key))
                .filter_map(|(_, (seq, doc))| doc.clone().map(|d| (*seq, d)))
                .collect();
            matches.sort_by_key(|(seq, _)| *seq);
            matches.into_iter().map(|(_, doc)| doc).collect()
        } else {
            self.entries
                .get(key)
                .and_then(|(_, doc)| doc.clone())
                .into_iter()
                .collect()
        }
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

    #[test]
    fn test_latest_entry_wins_regardless_of_arrival_order() {
        let mut index = LocalIndex::default();
        index.apply(&LogEntry::put(2, doc("a", "v2")));
        index.apply(&LogEntry::put(1, doc("a", "v1")));

        assert_eq!(index.query("a", GetOptions::exact()), vec![doc("a", "v2")]);
    }

    #[test]
    fn test_duplicate_entries_are_idempotent() {
        let mut index = LocalIndex::default();
        let entry = LogEntry::put(1, doc("a", "v1"));
        index.apply(&entry);
        index.apply(&entry);

        assert_eq!(index.query("a", GetOptions::exact()).len(), 1);
    }

    #[test]
    fn test_tombstone_hides_key() {
        let mut index = LocalIndex::default();
        index.apply(&LogEntry::put(1, doc("a", "v1")));
        index.apply(&LogEntry::tombstone(2, "a"));

        assert!(index.query("a", GetOptions::exact()).is_empty());
        assert!(index.query("a", GetOptions::partial()).is_empty());
    }

    #[test]
    fn test_partial_match_returns_all_containing_keys() {
        let mut index = LocalIndex::default();
        index.apply(&LogEntry::put(1, doc("user-1", "x")));
        index.apply(&LogEntry::put(2, doc("user-2", "y")));
        index.apply(&LogEntry::put(3, doc("note-1", "z")));

        let found = index.query("user", GetOptions::partial());
        assert_eq!(found, vec![doc("user-1", "x"), doc("user-2", "y")]);
    }

    #[test]
    fn test_entry_encoding_is_stable() {
        let entry = LogEntry::tombstone(7, "a");
        let encoded = entry.encode().unwrap();

        assert_eq!(LogEntry::decode(&encoded).unwrap(), entry);
        assert_eq!(entry.version(&encoded), entry.version(&encoded));
        assert_eq!(entry.version(&encoded).hash.len(), 64);
    }
}
