//! Product Service - Business logic layer

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductUpdate};
use crate::query::ProductQuery;
use crate::repository::ProductRepository;

/// What update and delete do when no product has the given id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingProductPolicy {
    /// Report success anyway.
    #[default]
    Ignore,
    /// Report `ProductError::NotFound`.
    NotFound,
}

impl FromStr for MissingProductPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "not_found" | "not-found" | "notfound" => Ok(Self::NotFound),
            other => Err(format!("expected 'ignore' or 'not_found', got '{other}'")),
        }
    }
}

impl fmt::Display for MissingProductPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignore => f.write_str("ignore"),
            Self::NotFound => f.write_str("not_found"),
        }
    }
}

/// Product service providing business logic operations
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    missing_policy: MissingProductPolicy,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            missing_policy: MissingProductPolicy::default(),
        }
    }

    pub fn with_missing_policy(mut self, policy: MissingProductPolicy) -> Self {
        self.missing_policy = policy;
        self
    }

    /// Store a product exactly as given. No duplicate-id check.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn create_product(&self, product: Product) -> ProductResult<Product> {
        self.repository.insert(product).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        self.repository.find(query).await
    }

    /// Merge the present fields of `update` onto the product with `id`.
    ///
    /// An empty update never writes.
    #[instrument(skip(self, update))]
    pub async fn update_product(&self, id: &str, update: ProductUpdate) -> ProductResult<()> {
        let matched = if update.is_empty() {
            match self.missing_policy {
                MissingProductPolicy::Ignore => return Ok(()),
                MissingProductPolicy::NotFound => {
                    u64::from(self.repository.find_by_id(id).await?.is_some())
                }
            }
        } else {
            self.repository.update(id, update).await?
        };

        self.check_found(id, matched)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;
        self.check_found(id, deleted)
    }

    fn check_found(&self, id: &str, affected: u64) -> ProductResult<()> {
        if affected > 0 {
            return Ok(());
        }
        match self.missing_policy {
            MissingProductPolicy::Ignore => {
                tracing::debug!(product_id = id, "No product matched; ignoring");
                Ok(())
            }
            MissingProductPolicy::NotFound => Err(ProductError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: 10.0,
            currency_unit: "USD".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_policy_parse() {
        assert_eq!("ignore".parse(), Ok(MissingProductPolicy::Ignore));
        assert_eq!("NOT_FOUND".parse(), Ok(MissingProductPolicy::NotFound));
        assert_eq!("not-found".parse(), Ok(MissingProductPolicy::NotFound));
        assert!("strict".parse::<MissingProductPolicy>().is_err());
        assert_eq!(MissingProductPolicy::NotFound.to_string(), "not_found");
    }

    #[tokio::test]
    async fn test_create_echoes_product() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_insert()
            .withf(|p| p.id == "1")
            .times(1)
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let created = service.create_product(product("1")).await.unwrap();

        assert_eq!(created, product("1"));
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.get_product("404").await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(ref id) if id == "404"));
    }

    #[tokio::test]
    async fn test_list_passes_query_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find()
            .withf(|q| q.page == 2 && q.limit == 3 && q.skip() == 3)
            .returning(|_| Ok(vec![product("4")]));

        let service = ProductService::new(mock_repo);
        let query = ProductQuery {
            page: 2,
            limit: 3,
            ..Default::default()
        };
        let products = service.list_products(query).await.unwrap();

        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_is_ignored_by_default() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().times(1).returning(|_, _| Ok(0));

        let service = ProductService::new(mock_repo);
        let update = ProductUpdate {
            name: Some("Renamed".into()),
            ..Default::default()
        };

        assert!(service.update_product("missing", update).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_under_strict_policy() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().returning(|_, _| Ok(0));

        let service =
            ProductService::new(mock_repo).with_missing_policy(MissingProductPolicy::NotFound);
        let update = ProductUpdate {
            price: Some(1.0),
            ..Default::default()
        };

        let err = service.update_product("missing", update).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_update_issues_no_write() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().never();
        mock_repo.expect_find_by_id().never();

        let service = ProductService::new(mock_repo);
        assert!(service
            .update_product("1", ProductUpdate::default())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_empty_update_checks_existence_under_strict_policy() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().never();
        mock_repo
            .expect_find_by_id()
            .withf(|id| id == "1")
            .returning(|_| Ok(Some(product("1"))));
        mock_repo
            .expect_find_by_id()
            .withf(|id| id == "2")
            .returning(|_| Ok(None));

        let service =
            ProductService::new(mock_repo).with_missing_policy(MissingProductPolicy::NotFound);

        assert!(service
            .update_product("1", ProductUpdate::default())
            .await
            .is_ok());
        assert!(service
            .update_product("2", ProductUpdate::default())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_delete_respects_policy() {
        let mut lenient_repo = MockProductRepository::new();
        lenient_repo.expect_delete().returning(|_| Ok(0));
        let lenient = ProductService::new(lenient_repo);
        assert!(lenient.delete_product("missing").await.is_ok());

        let mut strict_repo = MockProductRepository::new();
        strict_repo.expect_delete().returning(|_| Ok(0));
        let strict =
            ProductService::new(strict_repo).with_missing_policy(MissingProductPolicy::NotFound);
        assert!(matches!(
            strict.delete_product("missing").await,
            Err(ProductError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete()
            .returning(|_| Err(ProductError::Database("connection reset".into())));

        let service = ProductService::new(mock_repo);
        let err = service.delete_product("1").await.unwrap_err();

        assert!(matches!(err, ProductError::Database(_)));
    }
}
