use crate::{Claims, Result, SessionToken};
use asteroid_identity::User;
use asteroid_storage::OpContext;
use async_trait::async_trait;

/// Session issuer for authenticated users
#[async_trait]
pub trait SessionManager: Send + Sync {
    /// Issue a credential for a freshly authenticated user
    fn issue(&self, user: &User) -> Result<SessionToken>;

    /// Check signature and expiry and return the claims
    fn verify(&self, token: &str) -> Result<Claims>;

    /// Reissue a genuine token while its original login is inside the refresh window
    ///
    /// The presented token may already be expired.
    fn refresh(&self, token: &str) -> Result<SessionToken>;

    /// Verify a token and re-read the user it names
    async fn resolve(&self, ctx: &OpContext, token: &str) -> Result<User>;
}
