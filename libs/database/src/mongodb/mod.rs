//! MongoDB connector and utilities

mod config;
mod connector;
mod health;

pub use config::{DATABASE_ENV_KEYS, MongoConfig, URL_ENV_KEYS};
pub use connector::{client_from_config, connect_from_config, ping};
pub use health::{HEALTH_CHECK_TIMEOUT, HealthStatus, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
