use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default token validity and refresh window (one week)
pub const DEFAULT_SESSION_TTL: u64 = 7 * 24 * 60 * 60;

/// JWT claims
///
/// The subject travels under the `_id` claim key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "_id")]
    pub sub: String,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Time of the original login (unix seconds), kept across refreshes
    pub orig_iat: i64,
}

impl Claims {
    pub fn subject_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// An issued bearer credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    /// Expiry (unix seconds)
    pub expires_at: i64,
}
