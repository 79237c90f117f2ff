use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    /// A stored document does not fit the product shape
    #[error("Failed to decode stored product: {0}")]
    Decode(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::Database(msg) => AppError::Database(msg),
            ProductError::Decode(msg) => AppError::DatabaseDecode(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        match *err.kind {
            ErrorKind::BsonDeserialization(_) => ProductError::Decode(err.to_string()),
            _ => ProductError::Database(err.to_string()),
        }
    }
}

impl From<mongodb::bson::ser::Error> for ProductError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ProductError::Database(format!("failed to encode document: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_product_error_status_codes() {
        let cases = [
            (ProductError::NotFound("42".into()), StatusCode::NOT_FOUND),
            (
                ProductError::Database("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ProductError::Decode("price".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_not_found_hides_id_from_message() {
        let app: AppError = ProductError::NotFound("42".into()).into();
        assert!(matches!(app, AppError::NotFound(ref msg) if msg == "Product not found"));
    }

    #[test]
    fn test_bson_decode_failure_maps_to_decode() {
        let raw = mongodb::bson::doc! { "id": "1", "price": "ten" };
        let decode_err = mongodb::bson::from_document::<crate::models::Product>(raw).unwrap_err();
        let err = ProductError::from(mongodb::error::Error::from(decode_err));

        assert!(matches!(err, ProductError::Decode(_)));
        let app: AppError = err.into();
        assert!(matches!(app, AppError::DatabaseDecode(_)));
    }

    #[test]
    fn test_other_driver_failures_map_to_database() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = ProductError::from(mongodb::error::Error::from(io));
        assert!(matches!(err, ProductError::Database(_)));
    }
}
