//! # Product Catalog
//!
//! A small product catalog HTTP service. It keeps product records in memory
//! and exposes create/read/update/delete operations plus category filtering,
//! name search, pagination and per-category statistics, all behind a static
//! API key.
//!
//! ## Architecture
//!
//! - [`catalog`] - Product model and the in-memory [`ProductStore`]
//! - [`server`] - Axum router, handlers, API-key middleware
//! - [`config`] - CLI and environment configuration
//! - [`error`] - Error kinds and their HTTP mapping
//!
//! ## Example
//!
//! ```rust,no_run
//! use product_catalog::{create_router, AppState, ProductStore, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = AppState::new(ProductStore::seeded());
//!     let router = create_router(state, RouterConfig::new("my-secret-key"));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod server;

// Re-export commonly used types
pub use catalog::{
    CreateProductRequest, NewProduct, Product, ProductPatch, ProductStore, DEFAULT_PAGE,
    DEFAULT_PAGE_LIMIT,
};
pub use config::Config;
pub use error::{ApiError, ApiResult, ConfigError};
pub use server::{
    auth_middleware, create_router, ApiKeyAuth, AppState, ErrorResponse, ProductListQuery,
    RouterConfig,
};
