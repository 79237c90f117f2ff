//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOptions, IndexOptions},
    Collection, Database, IndexModel,
};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{Product, ProductUpdate};
use crate::query::{ProductFilter, ProductQuery, SortSpec};
use crate::repository::ProductRepository;

/// Collection used when none is configured.
pub const DEFAULT_COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Create the lookup index on `id`. It is not unique: duplicate ids are
    /// stored as given.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_product_id".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Equality filter from every present criterion.
    pub fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        let text_fields = [
            ("name", &filter.name),
            ("description", &filter.description),
            ("colour", &filter.colour),
            ("dimensions", &filter.dimensions),
            ("currencyUnit", &filter.currency_unit),
        ];
        for (key, value) in text_fields {
            if let Some(value) = value {
                doc.insert(key, value.as_str());
            }
        }

        if let Some(price) = filter.price {
            doc.insert("price", price);
        }

        doc
    }

    pub fn build_sort(sort: &SortSpec) -> Document {
        let mut doc = Document::new();
        doc.insert(sort.field.clone(), sort.order.direction());
        doc
    }

    fn find_options(query: &ProductQuery) -> FindOptions {
        let mut options = FindOptions::builder()
            .skip(query.skip())
            .limit(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .build();
        options.sort = query.sort.as_ref().map(Self::build_sort);
        options
    }

    fn id_filter(id: &str) -> Document {
        doc! { "id": id }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        self.collection.insert_one(&product).await?;

        tracing::info!("Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let filter = Self::build_filter(&query.filter);
        let options = Self::find_options(&query);

        let cursor = self.collection.find(filter).with_options(options).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        tracing::debug!(count = products.len(), "Products listed");
        Ok(products)
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: &str, update: ProductUpdate) -> ProductResult<u64> {
        // MongoDB rejects an empty $set
        if update.is_empty() {
            let count = self
                .collection
                .count_documents(Self::id_filter(id))
                .limit(1)
                .await?;
            return Ok(count);
        }

        let set = update.to_set_document()?;
        let result = self
            .collection
            .update_one(Self::id_filter(id), doc! { "$set": set })
            .await?;

        tracing::info!(
            matched = result.matched_count,
            modified = result.modified_count,
            "Product update applied"
        );
        Ok(result.matched_count)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ProductResult<u64> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        tracing::info!(deleted = result.deleted_count, "Product delete applied");
        Ok(result.deleted_count)
    }
}
