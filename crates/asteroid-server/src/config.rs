use anyhow::{anyhow, Context, Result};
use asteroid_sessions::DEFAULT_SESSION_TTL;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Minimum HMAC key length for session tokens
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Which Store backend to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    RocksDb,
    Memory,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_address: SocketAddr,

    pub store_backend: StoreBackend,

    /// RocksDB directory (rocksdb backend only)
    pub store_path: PathBuf,

    /// Logical store name, part of the store address
    pub store_name: String,

    /// Bound on every store operation
    pub store_timeout: Duration,

    /// HMAC key for session tokens
    pub jwt_secret: Vec<u8>,

    /// Session validity and refresh window (seconds)
    pub session_ttl: u64,

    pub session_cookie_name: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_address = var("BIND_ADDRESS", "0.0.0.0:3000")
            .parse()
            .context("BIND_ADDRESS must be a socket address")?;

        let store_backend = match var("STORE_BACKEND", "rocksdb").to_lowercase().as_str() {
            "rocksdb" => StoreBackend::RocksDb,
            "memory" => StoreBackend::Memory,
            other => anyhow::bail!("Unknown STORE_BACKEND: {}", other),
        };

        let store_path = var("STORE_PATH", "./data/asteroid").into();
        let store_name = var("STORE_NAME", "default");

        let store_timeout = Duration::from_secs(
            var("STORE_TIMEOUT_SECONDS", "10")
                .parse()
                .context("STORE_TIMEOUT_SECONDS must be an integer")?,
        );

        let jwt_secret = {
            let hex_key =
                lookup("JWT_SECRET").ok_or_else(|| anyhow!("JWT_SECRET environment variable required"))?;
            let bytes = hex::decode(hex_key.trim()).context("JWT_SECRET must be hex encoded")?;
            if bytes.len() < MIN_JWT_SECRET_LEN {
                anyhow::bail!(
                    "JWT_SECRET must be at least {} bytes ({} hex chars)",
                    MIN_JWT_SECRET_LEN,
                    MIN_JWT_SECRET_LEN * 2
                );
            }
            bytes
        };

        let session_ttl = var("SESSION_TTL_SECONDS", &DEFAULT_SESSION_TTL.to_string())
            .parse()
            .context("SESSION_TTL_SECONDS must be an integer")?;

        let session_cookie_name = var("SESSION_COOKIE_NAME", "Asteroid-JWT");

        Ok(Config {
            bind_address,
            store_backend,
            store_path,
            store_name,
            store_timeout,
            jwt_secret,
            session_ttl,
            session_cookie_name,
        })
    }
}
