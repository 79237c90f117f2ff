use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ProductResult;

/// A catalogue product as stored in MongoDB and exchanged over HTTP.
///
/// The JSON keys and the stored document keys are the same. Missing fields
/// default to empty strings and `0.0`; MongoDB's own `_id` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
#[schema(example = json!({
    "id": "1",
    "name": "Product 1",
    "description": "Description 1",
    "colour": "Red",
    "dimensions": "10x10x10",
    "price": 10.0,
    "currencyUnit": "USD"
}))]
pub struct Product {
    /// Caller-supplied identifier (not generated, uniqueness not enforced)
    pub id: String,
    pub name: String,
    pub description: String,
    pub colour: String,
    /// Free-form, e.g. `10x10x10`
    pub dimensions: String,
    pub price: f64,
    /// e.g. `USD`
    pub currency_unit: String,
}

/// Partial update. Present fields are `$set`, absent ones are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_unit: Option<String>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The `$set` payload: only the present fields, under their stored keys.
    pub fn to_set_document(&self) -> ProductResult<Document> {
        Ok(bson::to_document(self)?)
    }

    /// Apply the present fields to an in-memory product.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(ref id) = self.id {
            product.id = id.clone();
        }
        if let Some(ref name) = self.name {
            product.name = name.clone();
        }
        if let Some(ref description) = self.description {
            product.description = description.clone();
        }
        if let Some(ref colour) = self.colour {
            product.colour = colour.clone();
        }
        if let Some(ref dimensions) = self.dimensions {
            product.dimensions = dimensions.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(ref currency_unit) = self.currency_unit {
            product.currency_unit = currency_unit.clone();
        }
    }
}

/// Body returned by a successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateResponse {
    #[schema(example = "Product updated successfully")]
    pub message: String,
}

impl UpdateResponse {
    pub const UPDATED: &'static str = "Product updated successfully";

    pub fn updated() -> Self {
        Self {
            message: Self::UPDATED.to_string(),
        }
    }
}
