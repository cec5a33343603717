//! In-memory product store.
//!
//! The store owns the product list for the lifetime of the process. Lookups
//! and queries are linear scans; absence is reported as `None` and turned into
//! an HTTP error by the handlers.
//!
//! # Example
//!
//! ```rust
//! use product_catalog::catalog::{NewProduct, ProductStore};
//!
//! let mut store = ProductStore::seeded();
//! assert_eq!(store.len(), 5);
//!
//! let created = store
//!     .create(NewProduct::new("Mead", "Honey wine", 30.0, "Food"))
//!     .unwrap();
//! assert_eq!(store.get(created.id), Some(&created));
//! ```

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use super::model::{NewProduct, Product, ProductPatch};

/// Page used when none is given.
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when none is given.
pub const DEFAULT_PAGE_LIMIT: usize = 2;

/// Owned, ordered collection of products.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Vec<Product>,

    /// Highest id handed out or seeded; new ids are always above it
    last_id: u64,
}

impl ProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `products` in the given order.
    pub fn with_products(products: Vec<Product>) -> Self {
        let last_id = products.iter().map(|p| p.id).max().unwrap_or(0);
        Self { products, last_id }
    }

    /// Create a store with the five catalog records every fresh process starts with.
    pub fn seeded() -> Self {
        Self::with_products(seed_products())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products in insertion order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Append a product under a fresh id and return it.
    ///
    /// Returns `None` once `u64::MAX` has been handed out.
    pub fn create(&mut self, new: NewProduct) -> Option<Product> {
        let id = self.next_id()?;
        let product = Product::from_new(id, new);
        self.products.push(product.clone());
        Some(product)
    }

    /// Merge `patch` over the product with `id`.
    pub fn update(&mut self, id: u64, patch: ProductPatch) -> Option<&Product> {
        let product = self.products.iter_mut().find(|p| p.id == id)?;
        patch.apply(product);
        Some(product)
    }

    /// Remove the product with `id` and return it.
    pub fn delete(&mut self, id: u64) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(index))
    }

    /// Products whose category equals `category`, ignoring case.
    pub fn filter_by_category(&self, category: &str) -> Vec<Product> {
        let category = category.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.category.to_lowercase() == category)
            .cloned()
            .collect()
    }

    /// Products whose name contains `text`, ignoring case.
    pub fn search_by_name(&self, text: &str) -> Vec<Product> {
        let text = text.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&text))
            .cloned()
            .collect()
    }

    /// One page of the full collection.
    ///
    /// Pages are 1-based. Page 0, a zero limit, or a page past the end all
    /// yield an empty list.
    pub fn paginate(&self, page: usize, limit: usize) -> Vec<Product> {
        if page == 0 || limit == 0 {
            return Vec::new();
        }
        let start = (page - 1).saturating_mul(limit);
        self.products
            .iter()
            .skip(start)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Number of products per category.
    pub fn stats(&self) -> BTreeMap<String, usize> {
        let mut stats = BTreeMap::new();
        for product in &self.products {
            *stats.entry(product.category.clone()).or_insert(0) += 1;
        }
        stats
    }

    /// Next id: current Unix time in milliseconds, bumped past the last id
    /// when the clock has not advanced.
    fn next_id(&mut self) -> Option<u64> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let id = now.max(self.last_id.checked_add(1)?);
        self.last_id = id;
        Some(id)
    }
}

fn seed_products() -> Vec<Product> {
    let seed = [
        (1, "Honey Jar", "Pure organic honey", 10.0, "Food", true),
        (2, "Beeswax Candle", "Natural beeswax candle", 15.0, "Home", false),
        (3, "Royal Jelly", "Nutrient-rich bee secretion", 25.0, "Health", true),
        (4, "Bee Pollen", "Protein-rich pollen granules", 12.0, "Health", true),
        (5, "Honey Comb", "Raw honeycomb from the hive", 20.0, "Food", false),
    ];

    seed.into_iter()
        .map(|(id, name, description, price, category, in_stock)| Product {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
            in_stock: Some(in_stock),
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
