//! # Tillpoint Sync Server
//!
//! Reference HTTP sync server for Tillpoint terminals.
//!
//! This crate provides:
//! - HTTP endpoints (`GET /sync/{entity}`, `POST /sync/{entity}`,
//!   `GET /health`)
//! - Authentication middleware (HMAC-SHA256 bearer tokens)
//! - Server configuration (builder + environment)
//!
//! # Architecture
//!
//! All sync behavior lives in `tillpoint_engine`; this crate only maps
//! HTTP requests onto the registry and engine errors onto status codes.
//! A push either returns a full `SyncResult` (conflicts included — a
//! normal outcome) or fails entirely with an error status and no
//! partial result.
//!
//! # Authentication
//!
//! Authentication is optional but recommended for production:
//!
//! ```rust,ignore
//! use tillpoint_server::{ServerConfig, AuthConfig, TokenValidator};
//!
//! let secret = b"my-secure-secret-32-bytes-long!".to_vec();
//! let config = ServerConfig::default().with_auth(secret.clone());
//!
//! // Issue tokens for terminals
//! let validator = TokenValidator::new(AuthConfig::new(secret));
//! let token = validator.create_token(terminal_id);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod error;
mod routes;
mod state;

pub use auth::{AuthConfig, CallerId, TokenValidator};
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::AppState;
