//! HTTP request handlers for the product API.
//!
//! # Endpoints
//!
//! - `GET /` - Greeting
//! - `GET /api/products` - List products (filter, search, paginate)
//! - `POST /api/products` - Create a product
//! - `GET /api/products/{id}` - Fetch a product
//! - `PUT /api/products/{id}` - Merge fields into a product
//! - `DELETE /api/products/{id}` - Delete a product
//! - `GET /api/products/stats/data` - Product count per category

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, Path, Query, Request, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::catalog::{CreateProductRequest, Product, ProductPatch, ProductStore};
use crate::error::{ApiError, ApiResult};

/// Body of the greeting served at `/`.
pub const GREETING: &str = "Hello World from the Product Catalog API!";

/// Message returned to clients in place of internal error details.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Confirmation message for a successful delete.
pub const DELETED_MESSAGE: &str = "Product deleted successfully";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state holding the product store.
///
/// This is passed to all handlers via Axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    /// The product store; writers take the lock exclusively
    pub store: Arc<RwLock<ProductStore>>,
}

impl AppState {
    pub fn new(store: ProductStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// State backed by the five seed products.
    pub fn seeded() -> Self {
        Self::new(ProductStore::seeded())
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for the product list endpoint.
///
/// Values are kept as raw strings and coerced by the handler, so that a
/// non-numeric `page` yields an empty page instead of a rejected request.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    /// Category to match, ignoring case
    #[serde(default)]
    pub category: Option<String>,

    /// Case-insensitive substring of the product name
    #[serde(default)]
    pub name: Option<String>,

    /// 1-based page number; only used together with `limit`
    #[serde(default)]
    pub page: Option<String>,

    /// Page size; only used together with `page`
    #[serde(default)]
    pub limit: Option<String>,
}

/// Parse the leading decimal digits of `raw`, skipping leading whitespace and
/// an optional `+` sign (`"12abc"` yields 12). Returns `None` when no digits
/// lead the string, the value is negative, or it overflows.
pub fn coerce_integer(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().ok()
}

fn coerce_page_value(raw: &str) -> usize {
    coerce_integer(raw)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(0)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Select the products a list request asks for.
///
/// The parameters override each other rather than combine: a category filter
/// replaces the full list, a name search replaces that, and pagination (when
/// both `page` and `limit` are given) replaces it again, always starting from
/// the full collection.
pub fn select_products(store: &ProductStore, query: &ProductListQuery) -> Vec<Product> {
    let mut results = store.all().to_vec();

    if let Some(category) = non_empty(&query.category) {
        results = store.filter_by_category(category);
    }
    if let Some(name) = non_empty(&query.name) {
        results = store.search_by_name(name);
    }
    if let (Some(page), Some(limit)) = (non_empty(&query.page), non_empty(&query.limit)) {
        results = store.paginate(coerce_page_value(page), coerce_page_value(limit));
    }

    results
}

/// JSON body extractor that reports decoding failures as validation errors.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}

/// JSON body extractor for optional bodies.
///
/// A request without a body, or whose content type is not JSON, yields
/// `T::default()`. A JSON body that fails to decode is a validation error.
#[derive(Debug)]
pub struct OptionalJsonBody<T>(pub T);

impl<S, T> FromRequest<S> for OptionalJsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(OptionalJsonBody(T::default()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
        if bytes.is_empty() {
            return Ok(OptionalJsonBody(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
        Ok(OptionalJsonBody(value))
    }
}

/// `application/json` or any `+json` media type, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let essence = value.split(';').next().unwrap_or_default().trim();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };
    kind.eq_ignore_ascii_case("application")
        && (subtype.eq_ignore_ascii_case("json")
            || subtype.to_ascii_lowercase().ends_with("+json"))
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON body for not-found, validation and internal errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `"error"`
    pub status: &'static str,

    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

/// JSON body for rejected API keys.
#[derive(Debug, Serialize)]
pub struct UnauthorizedResponse {
    pub error: String,
}

/// JSON body carrying a confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert ApiError to an HTTP response.
///
/// Every error is logged: 5xx at ERROR level with the real cause, 4xx at
/// WARN level. Internal errors are masked behind a generic message.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(status = status.as_u16(), "Server error: {}", self);
        } else {
            warn!(status = status.as_u16(), "Client error: {}", self);
        }

        let message = if self.is_operational() {
            self.to_string()
        } else {
            INTERNAL_ERROR_MESSAGE.to_string()
        };

        match self {
            ApiError::Unauthorized => {
                (status, Json(UnauthorizedResponse { error: message })).into_response()
            }
            _ => (status, Json(ErrorResponse::new(message))).into_response(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle `GET /`.
pub async fn root_handler() -> &'static str {
    GREETING
}

/// Handle product list requests.
///
/// # Endpoint
///
/// `GET /api/products`
///
/// # Query Parameters
///
/// - `category`: keep products of this category (case-insensitive)
/// - `name`: keep products whose name contains this text (case-insensitive)
/// - `page`, `limit`: return one page of the full collection
///
/// Parameters do not compose; see [`select_products`] for the precedence.
pub async fn list_products_handler(
    State(state): State<AppState>,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(query) = query.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

    let store = state.store.read().await;
    let products = select_products(&store, &query);

    debug!(
        count = products.len(),
        total = store.len(),
        "Listed products"
    );

    Ok(Json(products))
}

/// Handle `GET /api/products/{id}`.
///
/// # Errors
///
/// - `404 Not Found`: no product with that id
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let id = coerce_integer(&id).ok_or_else(ApiError::product_not_found)?;

    let store = state.store.read().await;
    store
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(ApiError::product_not_found)
}

/// Handle `POST /api/products`.
///
/// Requires `name`, `description`, `price` and `category`; `inStock` is
/// optional.
///
/// # Response
///
/// - `201 Created`: the new product, including its generated id
/// - `400 Bad Request`: missing fields or a malformed body
pub async fn create_product_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let new = request.validate()?;

    let product = state
        .store
        .write()
        .await
        .create(new)
        .ok_or_else(|| ApiError::Internal("product id space exhausted".to_string()))?;
    debug!(id = product.id, name = %product.name, "Created product");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Handle `PUT /api/products/{id}`.
///
/// The body is merged over the stored product; fields it does not mention
/// keep their values. A missing body leaves the product as it is.
///
/// # Errors
///
/// - `400 Bad Request`: malformed JSON body
/// - `404 Not Found`: no product with that id
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    OptionalJsonBody(patch): OptionalJsonBody<ProductPatch>,
) -> ApiResult<Json<Product>> {
    let id = coerce_integer(&id).ok_or_else(ApiError::product_not_found)?;

    if patch.is_empty() {
        debug!(id, "Update carries no product fields");
        let store = state.store.read().await;
        return store
            .get(id)
            .cloned()
            .map(Json)
            .ok_or_else(ApiError::product_not_found);
    }

    let mut store = state.store.write().await;
    let updated = store
        .update(id, patch)
        .cloned()
        .ok_or_else(ApiError::product_not_found)?;
    debug!(id, "Updated product");

    Ok(Json(updated))
}

/// Handle `DELETE /api/products/{id}`.
///
/// # Errors
///
/// - `404 Not Found`: no product with that id
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = coerce_integer(&id).ok_or_else(ApiError::product_not_found)?;

    let removed = state
        .store
        .write()
        .await
        .delete(id)
        .ok_or_else(ApiError::product_not_found)?;
    debug!(id = removed.id, name = %removed.name, "Deleted product");

    Ok(Json(MessageResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}

/// Handle `GET /api/products/stats/data`.
///
/// # Response
///
/// `200 OK` with the number of products per category:
/// ```json
/// { "Food": 2, "Health": 2, "Home": 1 }
/// ```
pub async fn stats_handler(State(state): State<AppState>) -> Json<BTreeMap<String, usize>> {
    Json(state.store.read().await.stats())
}

/// Answer requests that match no route.
pub async fn fallback_handler() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

// =============================================================================
// Tests
// =============================================================================
