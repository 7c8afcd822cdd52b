//! User entity.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A registered user
///
/// Serialized with the camelCase field names stored documents already use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    /// PKCS#1 `RSA PUBLIC KEY` PEM block
    pub public_key: String,
    /// Current login challenge (base64 SHA-256 digest)
    pub nonce: String,
    pub is_admin: bool,
    /// Unix seconds
    pub created_at: i64,
    /// Unix seconds
    pub updated_at: i64,
    /// Owned note ids in creation order, duplicates allowed
    #[serde(default, deserialize_with = "deserialize_notes")]
    pub notes: Vec<Uuid>,
}

impl User {
    pub fn owns_note(&self, note_id: &Uuid) -> bool {
        self.notes.contains(note_id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NotesRepr {
    List(Vec<Uuid>),
    Delimited(String),
}

// Older documents store notes as a ";"-joined string with a leading separator
fn deserialize_notes<'de, D>(deserializer: D) -> Result<Vec<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NotesRepr>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(NotesRepr::List(ids)) => Ok(ids),
        Some(NotesRepr::Delimited(joined)) => joined
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| Uuid::parse_str(part).map_err(serde::de::Error::custom))
            .collect(),
    }
}
