//! Authentication middleware for the sync server.
//!
//! Terminals authenticate with HMAC-SHA256 bearer tokens. A token is:
//!
//! - 8 bytes: caller id (big-endian)
//! - 8 bytes: issued-at (Unix millis, big-endian)
//! - 32 bytes: HMAC-SHA256 signature
//!
//! Total 48 bytes, base64-encoded in the `Authorization: Bearer` header.
//!
//! The middleware only establishes *who* is calling; authorization
//! decisions are out of scope for the sync path.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

const TOKEN_LEN: usize = 48;

/// Authenticated caller identity, inserted into request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerId(pub i64);

/// Authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key for HMAC.
    pub secret: Vec<u8>,
    /// Token expiration duration.
    pub token_expiry: Duration,
}

impl AuthConfig {
    /// Creates a new auth configuration with a 24-hour expiry.
    pub fn new(secret: Vec<u8>) -> Self {
        Self {
            secret,
            token_expiry: Duration::from_secs(24 * 60 * 60),
        }
    }

    /// Sets the token expiration duration.
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.token_expiry = expiry;
        self
    }
}

/// Issues and validates bearer tokens.
#[derive(Clone)]
pub struct TokenValidator {
    config: AuthConfig,
}

impl TokenValidator {
    /// Creates a new token validator.
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Creates a token for a caller, base64-encoded for the header.
    pub fn create_token(&self, caller_id: i64) -> String {
        let issued_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let mut data = Vec::with_capacity(TOKEN_LEN);
        data.extend_from_slice(&caller_id.to_be_bytes());
        data.extend_from_slice(&issued_at.to_be_bytes());

        let signature = self.sign(&data);
        data.extend_from_slice(&signature);
        BASE64.encode(data)
    }

    /// Validates a base64 token and returns the caller it names.
    pub fn validate(&self, token: &str) -> ApiResult<CallerId> {
        let bytes = BASE64
            .decode(token)
            .map_err(|_| ApiError::Unauthorized("malformed token".into()))?;
        if bytes.len() != TOKEN_LEN {
            return Err(ApiError::Unauthorized("invalid token length".into()));
        }

        let signature = &bytes[16..48];
        let expected = self.sign(&bytes[0..16]);
        if signature != expected.as_slice() {
            return Err(ApiError::Unauthorized("invalid signature".into()));
        }

        let issued_at = u64::from_be_bytes(
            bytes[8..16]
                .try_into()
                .map_err(|_| ApiError::Unauthorized("malformed token".into()))?,
        );
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        let expiry_millis = self.config.token_expiry.as_millis() as u64;
        if now > issued_at + expiry_millis {
            return Err(ApiError::Unauthorized("token expired".into()));
        }

        let caller_id = i64::from_be_bytes(
            bytes[0..8]
                .try_into()
                .map_err(|_| ApiError::Unauthorized("malformed token".into()))?,
        );
        Ok(CallerId(caller_id))
    }

    fn sign(&self, data: &[u8]) -> [u8; 32] {
        let mut mac =
            HmacSha256::new_from_slice(&self.config.secret).expect("HMAC can take key of any size");
        mac.update(data);
        mac.finalize().into_bytes().into()
    }
}

/// Middleware enforcing authentication when the server requires it.
///
/// The validated [`CallerId`] is inserted into request extensions for
/// handlers that want to log it.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(validator) = state.validator() {
        let token = request
            .headers()
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("missing bearer token".into()))?;

        let caller = validator.validate(token)?;
        tracing::debug!(caller = caller.0, "authenticated");
        request.extensions_mut().insert(caller);
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> TokenValidator {
        TokenValidator::new(AuthConfig::new(b"test-secret-key-32-bytes-long!!".to_vec()))
    }

    #[test]
    fn create_and_validate_token() {
        let validator = validator();
        let token = validator.create_token(42);
        assert_eq!(validator.validate(&token).unwrap(), CallerId(42));
    }

    #[test]
    fn reject_tampered_token() {
        let validator = validator();
        let token = validator.create_token(42);

        let mut bytes = BASE64.decode(&token).unwrap();
        bytes[20] ^= 0xFF;
        let tampered = BASE64.encode(bytes);

        assert!(validator.validate(&tampered).is_err());
    }

    #[test]
    fn reject_wrong_secret() {
        let token = validator().create_token(42);
        let other = TokenValidator::new(AuthConfig::new(b"another-secret".to_vec()));
        assert!(other.validate(&token).is_err());
    }

    #[test]
    fn reject_expired_token() {
        let validator = TokenValidator::new(
            AuthConfig::new(b"secret".to_vec()).with_expiry(Duration::from_secs(0)),
        );
        let token = validator.create_token(42);
        std::thread::sleep(Duration::from_millis(10));
        assert!(validator.validate(&token).is_err());
    }

    #[test]
    fn reject_garbage() {
        let validator = validator();
        assert!(validator.validate("not base64 !!!").is_err());
        assert!(validator.validate(&BASE64.encode(b"short")).is_err());
    }
}
