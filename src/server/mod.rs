//! HTTP server layer for the product catalog.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │            GET/POST/PUT/DELETE /api/products[/{id}]             │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌────────┐  │
//! │  │  handlers   │  │    auth     │  │ middleware  │  │ routes │  │
//! │  │ (requests)  │  │ (x-api-key) │  │ (log/panic) │  │        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────┘  └────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//!                                ▼
//!                  ProductStore (Arc<RwLock<_>>)
//! ```

pub mod auth;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use auth::{auth_middleware, ApiKeyAuth, API_KEY_HEADER};
pub use handlers::{
    coerce_integer, create_product_handler, delete_product_handler, get_product_handler,
    list_products_handler, root_handler, select_products, stats_handler, update_product_handler,
    AppState, ErrorResponse, JsonBody, MessageResponse, OptionalJsonBody, ProductListQuery,
    UnauthorizedResponse, DELETED_MESSAGE, GREETING, INTERNAL_ERROR_MESSAGE,
};
pub use middleware::{handle_panic, request_logging_middleware};
pub use routes::{create_router, RouterConfig, PRODUCTS_PREFIX};
