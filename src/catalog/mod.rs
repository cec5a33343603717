//! Product catalog domain.
//!
//! - [`model`] - product record and request payloads
//! - [`store`] - in-memory store with CRUD and query operations

pub mod model;
pub mod store;

pub use model::{CreateProductRequest, NewProduct, Product, ProductPatch};
pub use store::{ProductStore, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};
