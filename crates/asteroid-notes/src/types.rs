//! Note entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A text note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    /// Owner identity id
    pub uid: Uuid,
    pub data: String,
}
