//! Product records and the request payloads that create or modify them.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// =============================================================================
// Product
// =============================================================================

/// A catalog record.
///
/// Serialized with camelCase keys, so `in_stock` travels as `inStock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by the store
    pub id: u64,

    pub name: String,

    pub description: String,

    pub price: f64,

    pub category: String,

    /// Stock flag; omitted from output when it was never supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

impl Product {
    /// Build a product from validated fields and an id.
    pub fn from_new(id: u64, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            category: new.category,
            in_stock: new.in_stock,
        }
    }
}

// =============================================================================
// Create
// =============================================================================

/// Fields of a product that passed validation, waiting for an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: Option<bool>,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            category: category.into(),
            in_stock: None,
        }
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }
}

/// Body of `POST /api/products`.
///
/// Every field is optional at the decoding stage so that a missing field is
/// reported as a validation error rather than a decoding failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub in_stock: Option<bool>,
}

impl CreateProductRequest {
    /// Check that `name`, `description`, `price` and `category` are present
    /// and non-empty. A price of zero counts as missing.
    pub fn validate(self) -> Result<NewProduct, ApiError> {
        let name = self.name.filter(|s| !s.is_empty());
        let description = self.description.filter(|s| !s.is_empty());
        let price = self.price.filter(|p| *p != 0.0);
        let category = self.category.filter(|s| !s.is_empty());

        match (name, description, price, category) {
            (Some(name), Some(description), Some(price), Some(category)) => Ok(NewProduct {
                name,
                description,
                price,
                category,
                in_stock: self.in_stock,
            }),
            _ => Err(ApiError::missing_fields()),
        }
    }
}

// =============================================================================
// Update
// =============================================================================

/// Body of `PUT /api/products/{id}`: a partial product.
///
/// Keys that are absent (or `null`) leave the stored field untouched. Unknown
/// keys, including `id`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub in_stock: Option<bool>,
}

impl ProductPatch {
    /// Overwrite the fields of `product` that this patch carries.
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = Some(in_stock);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }
}

// =============================================================================
// Tests
// =============================================================================
