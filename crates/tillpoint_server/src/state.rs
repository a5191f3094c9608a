//! Shared application state.

use crate::auth::{AuthConfig, TokenValidator};
use crate::config::ServerConfig;
use std::sync::Arc;
use tillpoint_engine::SyncRegistry;

/// State shared by every request handler.
///
/// The registry is built once at startup; there is no other shared
/// mutable state between calls.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<SyncRegistry>,
    config: Arc<ServerConfig>,
    validator: Option<TokenValidator>,
}

impl AppState {
    /// Creates state with a fresh registry.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_registry(config, Arc::new(SyncRegistry::new()))
    }

    /// Creates state around an existing registry (tests, embedding).
    pub fn with_registry(config: ServerConfig, registry: Arc<SyncRegistry>) -> Self {
        let validator = config
            .auth_secret
            .as_ref()
            .filter(|_| config.require_auth)
            .map(|secret| {
                TokenValidator::new(
                    AuthConfig::new(secret.clone()).with_expiry(config.token_expiry),
                )
            });

        Self {
            registry,
            config: Arc::new(config),
            validator,
        }
    }

    /// The entity registry.
    pub fn registry(&self) -> &SyncRegistry {
        &self.registry
    }

    /// The server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The token validator, when authentication is required.
    pub fn validator(&self) -> Option<&TokenValidator> {
        self.validator.as_ref()
    }
}
