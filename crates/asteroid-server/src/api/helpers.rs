//! Shared API helper functions.

use crate::error::ApiError;
use axum::http::HeaderValue;
use uuid::Uuid;

/// Parse an id path or body parameter
pub fn parse_uuid(value: &str, field: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| ApiError::InvalidRequest(format!("Invalid {}: expected a UUID", field)))
}

/// Format a unix timestamp (seconds) as RFC3339.
pub fn format_timestamp_rfc3339(timestamp: i64) -> Result<String, ApiError> {
    Ok(chrono::DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("Invalid timestamp")))?
        .to_rfc3339())
}

/// `Set-Cookie` value carrying the session token
pub fn session_cookie(name: &str, token: &str, max_age: u64) -> Result<HeaderValue, ApiError> {
    let cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        name, token, max_age
    );
    HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Invalid cookie value: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string(), "id").unwrap(), id);
        assert!(matches!(
            parse_uuid("nope", "id"),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_session_cookie() {
        let cookie = session_cookie("Asteroid-JWT", "a.b.c", 60).unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "Asteroid-JWT=a.b.c; Path=/; Max-Age=60; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp_rfc3339(0).unwrap(),
            "1970-01-01T00:00:00+00:00"
        );
    }
}
