//! Session issuer implementation.

use crate::{errors::*, traits::SessionManager, types::*};
use asteroid_identity::{IdentityStore, User};
use asteroid_storage::OpContext;
use async_trait::async_trait;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// HS256 session issuer
pub struct SessionService<I: IdentityStore> {
    pub(crate) identities: Arc<I>,
    secret: Zeroizing<Vec<u8>>,
    pub(crate) ttl: u64, // seconds
}

impl<I: IdentityStore> SessionService<I> {
    /// Create a session service with the default one-week validity
    pub fn new(identities: Arc<I>, secret: Vec<u8>) -> Self {
        Self::with_ttl(identities, secret, DEFAULT_SESSION_TTL)
    }

    /// Create a session service with a custom validity (seconds)
    pub fn with_ttl(identities: Arc<I>, secret: Vec<u8>, ttl: u64) -> Self {
        Self {
            identities,
            secret: Zeroizing::new(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String> {
        let token = encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(&self.secret),
        )?;
        Ok(token)
    }

    fn decode_claims(&self, token: &str, validate_exp: bool) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = validate_exp;
        if !validate_exp {
            validation.required_spec_claims.clear();
        }

        decode::<Claims>(token, &DecodingKey::from_secret(&self.secret), &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::TokenExpired,
                _ => SessionError::InvalidToken,
            })
    }

    fn ttl_secs(&self) -> i64 {
        i64::try_from(self.ttl).unwrap_or(i64::MAX)
    }

    fn token_for(&self, sub: String, orig_iat: i64, now: i64) -> Result<SessionToken> {
        let claims = Claims {
            sub,
            exp: now.saturating_add(self.ttl_secs()),
            orig_iat,
        };
        let token = self.sign(&claims)?;
        Ok(SessionToken {
            token,
            expires_at: claims.exp,
        })
    }
}

#[async_trait]
impl<I: IdentityStore> SessionManager for SessionService<I> {
    fn issue(&self, user: &User) -> Result<SessionToken> {
        let now = chrono::Utc::now().timestamp();
        let session = self.token_for(user.id.to_string(), now, now)?;

        info!(identity_id = %user.id, expires_at = session.expires_at, "Session issued");
        Ok(session)
    }

    fn verify(&self, token: &str) -> Result<Claims> {
        self.decode_claims(token, true)
    }

    fn refresh(&self, token: &str) -> Result<SessionToken> {
        let claims = self.decode_claims(token, false)?;
        let now = chrono::Utc::now().timestamp();

        if claims.orig_iat.saturating_add(self.ttl_secs()) < now {
            warn!(sub = %claims.sub, "Refresh window expired");
            return Err(SessionError::RefreshWindowExpired);
        }

        let session = self.token_for(claims.sub, claims.orig_iat, now)?;
        debug!(expires_at = session.expires_at, "Session refreshed");
        Ok(session)
    }

    async fn resolve(&self, ctx: &OpContext, token: &str) -> Result<User> {
        let claims = self.verify(token)?;
        let id = claims.subject_id().ok_or(SessionError::InvalidToken)?;

        Ok(self.identities.find_user(ctx, id).await?)
    }
}
