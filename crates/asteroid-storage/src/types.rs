//! Document envelope and store option types.

use serde::{Deserialize, Serialize};

/// The persisted envelope: `{ "_id": <string>, "data": <base64 json> }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: String,
    pub data: String,
}

/// Handle to the log entry produced by an append
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionHandle {
    /// Position of the entry in the log
    pub seq: u64,
    /// Hex SHA-256 of the encoded entry
    pub hash: String,
}

/// Query options for [`Store::get`](crate::Store::get)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetOptions {
    /// Match every key containing the query instead of the exact key
    pub partial_match: bool,
}

impl GetOptions {
    pub fn exact() -> Self {
        Self {
            partial_match: false,
        }
    }

    pub fn partial() -> Self {
        Self {
            partial_match: true,
        }
    }
}

/// How much of the log a [`Store::load`](crate::Store::load) replays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadDepth {
    /// The whole log
    Unbounded,
    /// Only the newest `n` entries
    Latest(usize),
}

impl LoadDepth {
    /// Map the conventional integer depth, where any negative value is unbounded
    pub fn from_raw(depth: i64) -> Self {
        if depth < 0 {
            LoadDepth::Unbounded
        } else {
            LoadDepth::Latest(depth as usize)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_depth_from_raw() {
        assert_eq!(LoadDepth::from_raw(-1), LoadDepth::Unbounded);
        assert_eq!(LoadDepth::from_raw(0), LoadDepth::Latest(0));
        assert_eq!(LoadDepth::from_raw(3), LoadDepth::Latest(3));
    }
}
