//! Server configuration.

use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the sync server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// Maximum number of records accepted in one push batch.
    pub max_push_batch: usize,
    /// Whether to require authentication.
    pub require_auth: bool,
    /// Secret key for token validation (if auth enabled).
    pub auth_secret: Option<Vec<u8>>,
    /// Token expiration duration.
    pub token_expiry: Duration,
}

impl ServerConfig {
    /// Creates a new server configuration.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            max_push_batch: 500,
            require_auth: false,
            auth_secret: None,
            token_expiry: Duration::from_secs(24 * 60 * 60),
        }
    }

    /// Sets the maximum push batch size.
    pub fn with_max_push_batch(mut self, size: usize) -> Self {
        self.max_push_batch = size;
        self
    }

    /// Enables authentication with the given secret.
    pub fn with_auth(mut self, secret: Vec<u8>) -> Self {
        self.require_auth = true;
        self.auth_secret = Some(secret);
        self
    }

    /// Sets the token expiration duration.
    pub fn with_token_expiry(mut self, expiry: Duration) -> Self {
        self.token_expiry = expiry;
        self
    }

    /// Reads configuration from `TILLPOINT_*` environment variables,
    /// falling back to defaults for anything unset.
    ///
    /// - `TILLPOINT_BIND`: socket address
    /// - `TILLPOINT_MAX_PUSH_BATCH`: batch cap
    /// - `TILLPOINT_AUTH_SECRET`: enables auth when present
    /// - `TILLPOINT_TOKEN_EXPIRY_SECS`: token lifetime
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(addr) = std::env::var("TILLPOINT_BIND")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.bind_addr = addr;
        }
        if let Some(size) = std::env::var("TILLPOINT_MAX_PUSH_BATCH")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.max_push_batch = size;
        }
        if let Ok(secret) = std::env::var("TILLPOINT_AUTH_SECRET") {
            if !secret.is_empty() {
                config = config.with_auth(secret.into_bytes());
            }
        }
        if let Some(secs) = std::env::var("TILLPOINT_TOKEN_EXPIRY_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.token_expiry = Duration::from_secs(secs);
        }

        config
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 8400)))
    }
}
