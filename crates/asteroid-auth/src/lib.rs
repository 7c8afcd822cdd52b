//! # asteroid-auth
//!
//! Challenge-response login. Every user carries a nonce; the client signs it
//! with the private half of the registered RSA key, and a successful check
//! consumes the nonce by rotating it.

#![warn(clippy::all)]

pub mod errors;
pub mod service;
pub mod traits;

pub use errors::{AuthError, Result};
pub use service::Authenticator;
pub use traits::ChallengeAuthenticator;
