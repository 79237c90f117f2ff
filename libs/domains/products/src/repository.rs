use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{Product, ProductUpdate};
use crate::query::ProductQuery;

/// Repository trait for Product persistence
///
/// Every method maps to a single document-store operation keyed by the
/// product's own `id` field.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product and return it as given
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Get a product by ID
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Filtered, sorted, paginated listing
    async fn find(&self, query: ProductQuery) -> ProductResult<Vec<Product>>;

    /// Merge the present fields onto the matching product.
    ///
    /// Returns the number of matched products (0 or 1).
    async fn update(&self, id: &str, update: ProductUpdate) -> ProductResult<u64>;

    /// Returns the number of deleted products (0 or 1).
    async fn delete(&self, id: &str) -> ProductResult<u64>;
}
