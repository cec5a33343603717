use http::StatusCode;
use thiserror::Error;

/// Result alias used by the HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the product API.
///
/// Every handler and extractor returns this type; its `IntoResponse`
/// implementation (see [`crate::server::handlers`]) is the only place where
/// errors are turned into HTTP responses.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Requested resource does not exist (HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// Request input is missing or malformed (HTTP 400)
    #[error("{0}")]
    Validation(String),

    /// Missing or mismatched `x-api-key` header (HTTP 401)
    #[error("Unauthorized: Invalid API key")]
    Unauthorized,

    /// Unexpected fault; the message is logged, never returned to the client
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Not-found error for a product lookup.
    pub fn product_not_found() -> Self {
        ApiError::NotFound("Product not found".to_string())
    }

    /// Validation error for a create request lacking required fields.
    pub fn missing_fields() -> Self {
        ApiError::Validation("Missing required fields".to_string())
    }

    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the message is safe to expose to clients.
    pub fn is_operational(&self) -> bool {
        !matches!(self, ApiError::Internal(_))
    }
}

/// Errors reported by [`crate::config::Config::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No API key was configured
    #[error("API key is required. Set --api-key or API_KEY")]
    MissingApiKey,

    /// Host is empty
    #[error("Host must not be empty")]
    EmptyHost,
}
