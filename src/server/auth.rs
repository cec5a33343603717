//! Static API-key authentication.
//!
//! Every request must carry the configured secret in the `x-api-key` header.
//! Requests without it, or with a different value, are rejected with
//! `401 Unauthorized` before any route logic runs.
//!
//! ```text
//! GET /api/products HTTP/1.1
//! x-api-key: my-secret-key
//! ```
//!
//! # Example
//!
//! ```rust
//! use product_catalog::server::auth::ApiKeyAuth;
//!
//! let auth = ApiKeyAuth::new("my-secret-key");
//! assert!(auth.verify(Some("my-secret-key")).is_ok());
//! assert!(auth.verify(Some("guess")).is_err());
//! assert!(auth.verify(None).is_err());
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::error::ApiError;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Checks request API keys against the configured secret.
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: Vec<u8>,
}

impl ApiKeyAuth {
    pub fn new(api_key: impl AsRef<[u8]>) -> Self {
        Self {
            api_key: api_key.as_ref().to_vec(),
        }
    }

    /// Compare a presented key with the configured one in constant time.
    pub fn verify(&self, presented: Option<&str>) -> Result<(), ApiError> {
        let presented = presented.ok_or(ApiError::Unauthorized)?;

        if presented.as_bytes().ct_eq(&self.api_key).into() {
            Ok(())
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware rejecting requests whose `x-api-key` header does not match.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware};
/// use product_catalog::server::auth::{ApiKeyAuth, auth_middleware};
///
/// let auth = ApiKeyAuth::new("secret-key");
/// let app = Router::new()
///     .route("/", get(root_handler))
///     .layer(middleware::from_fn_with_state(auth, auth_middleware));
/// ```
pub async fn auth_middleware(
    State(auth): State<ApiKeyAuth>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if let Err(err) = auth.verify(presented) {
        debug!(
            method = %request.method(),
            uri = %request.uri(),
            key_present = presented.is_some(),
            "Rejected request with invalid API key"
        );
        return Err(err);
    }

    Ok(next.run(request).await)
}

// =============================================================================
// Tests
// =============================================================================
