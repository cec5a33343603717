//! Router configuration for the product catalog.
//!
//! This module defines the HTTP routes and applies the middleware chain.
//!
//! # Route Structure
//!
//! ```text
//! /                              - Greeting
//! /api/products                  - List (GET) and create (POST)
//! /api/products/stats/data       - Category statistics
//! /api/products/{id}             - Fetch (GET), update (PUT), delete (DELETE)
//! ```
//!
//! Every route, the greeting included, requires the `x-api-key` header.
//!
//! # Middleware Order
//!
//! Outermost first: request logging, panic recovery, CORS, API-key check.
//!
//! # Example
//!
//! ```ignore
//! use product_catalog::catalog::ProductStore;
//! use product_catalog::server::{create_router, AppState, RouterConfig};
//!
//! let state = AppState::new(ProductStore::seeded());
//! let router = create_router(state, RouterConfig::new("my-secret-key"));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{middleware, routing::get, Router};
use http::header::{CONTENT_TYPE, HeaderName};
use http::Method;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

use super::auth::{auth_middleware, ApiKeyAuth, API_KEY_HEADER};
use super::handlers::{
    create_product_handler, delete_product_handler, fallback_handler, get_product_handler,
    list_products_handler, root_handler, stats_handler, update_product_handler, AppState,
};
use super::middleware::{handle_panic, request_logging_middleware};

/// Path prefix the product routes are mounted under.
pub const PRODUCTS_PREFIX: &str = "/api/products";

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Secret expected in the `x-api-key` header
    pub api_key: String,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to log every request
    pub request_logging: bool,
}

impl RouterConfig {
    /// Create a new router configuration with the given API key.
    ///
    /// By default CORS allows any origin and request logging is enabled.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            cors_origins: None,
            request_logging: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable or disable per-request logging.
    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.request_logging = enabled;
        self
    }
}

impl std::fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterConfig")
            .field("api_key", &"<redacted>")
            .field("cors_origins", &self.cors_origins)
            .field("request_logging", &self.request_logging)
            .finish()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// # Arguments
///
/// * `app_state` - Shared state holding the product store
/// * `config` - Router configuration
pub fn create_router(app_state: AppState, config: RouterConfig) -> Router {
    let auth = ApiKeyAuth::new(&config.api_key);
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/", get(root_handler))
        .nest(PRODUCTS_PREFIX, product_routes())
        .fallback(fallback_handler)
        .with_state(app_state)
        .layer(middleware::from_fn_with_state(auth, auth_middleware))
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic));

    if config.request_logging {
        router.layer(middleware::from_fn(request_logging_middleware))
    } else {
        router
    }
}

/// Routes mounted under [`PRODUCTS_PREFIX`].
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products_handler).post(create_product_handler))
        .route("/stats/data", get(stats_handler))
        .route(
            "/{id}",
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
