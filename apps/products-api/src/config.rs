//! Configuration for Products API

use core_config::{app_info, env_or_default, server::ServerConfig, AppInfo, ConfigError, FromEnv};
use database::mongodb::MongoConfig;
use domain_products::{mongodb::DEFAULT_COLLECTION, MissingProductPolicy};

pub use core_config::Environment;

/// Database used when neither `MONGODB_DATABASE` nor `MONGO_DATABASE` is set.
pub const DEFAULT_DATABASE: &str = "productdb";

/// Product-domain settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductsConfig {
    pub collection: String,
    pub missing_policy: MissingProductPolicy,
}

impl FromEnv for ProductsConfig {
    /// - PRODUCTS_COLLECTION: defaults to `products`
    /// - PRODUCTS_MISSING_ID_POLICY: `ignore` (default) or `not_found`
    fn from_env() -> Result<Self, ConfigError> {
        let collection = env_or_default("PRODUCTS_COLLECTION", DEFAULT_COLLECTION);

        let missing_policy = match std::env::var("PRODUCTS_MISSING_ID_POLICY") {
            Ok(raw) => raw.parse().map_err(|details| ConfigError::InvalidValue {
                key: "PRODUCTS_MISSING_ID_POLICY".to_string(),
                details,
            })?,
            Err(_) => MissingProductPolicy::default(),
        };

        Ok(Self {
            collection,
            missing_policy,
        })
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub products: ProductsConfig,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let mut mongodb = MongoConfig::from_env_or_database(DEFAULT_DATABASE)?;
        let products = ProductsConfig::from_env()?;

        let app = app_info!();
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(app.name);
        }

        Ok(Self {
            app,
            environment,
            server,
            mongodb,
            products,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                ("MONGO_URI", Some("mongodb://mongo:27017")),
                ("MONGODB_URL", None),
                ("MONGODB_DATABASE", None),
                ("MONGO_DATABASE", None),
                ("MONGODB_APP_NAME", None),
                ("PRODUCTS_COLLECTION", None),
                ("PRODUCTS_MISSING_ID_POLICY", None),
                ("PORT", None),
                ("HOST", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.mongodb.url(), "mongodb://mongo:27017");
                assert_eq!(config.mongodb.database(), "productdb");
                assert_eq!(config.mongodb.app_name.as_deref(), Some("products_api"));
                assert_eq!(config.products.collection, "products");
                assert_eq!(config.products.missing_policy, MissingProductPolicy::Ignore);
                assert_eq!(config.server.address(), "0.0.0.0:8080");
            },
        );
    }

    #[test]
    fn test_config_overrides() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://db:27017")),
                ("MONGODB_DATABASE", Some("catalogue")),
                ("PRODUCTS_COLLECTION", Some("items")),
                ("PRODUCTS_MISSING_ID_POLICY", Some("not_found")),
                ("PORT", Some("9000")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.mongodb.database(), "catalogue");
                assert_eq!(config.products.collection, "items");
                assert_eq!(
                    config.products.missing_policy,
                    MissingProductPolicy::NotFound
                );
                assert_eq!(config.server.port, 9000);
            },
        );
    }

    #[test]
    fn test_config_requires_connection_string() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URI", None),
                ("MONGO_URL", None),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(_)));
            },
        );
    }

    #[test]
    fn test_config_rejects_unknown_policy() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://db:27017")),
                ("PRODUCTS_MISSING_ID_POLICY", Some("explode")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("PRODUCTS_MISSING_ID_POLICY"));
            },
        );
    }
}
