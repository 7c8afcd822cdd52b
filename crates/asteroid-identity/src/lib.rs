//! # asteroid-identity
//!
//! User identities: a public key, the current login nonce and the ids of
//! the notes the user owns.

#![warn(clippy::all)]

pub mod errors;
pub mod service;
pub mod traits;
pub mod types;

pub use errors::{IdentityError, Result};
pub use service::IdentityService;
pub use traits::IdentityStore;
pub use types::*;
