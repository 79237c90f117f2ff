use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// Build a client from `config` without touching the network.
///
/// The driver connects lazily, so this only fails on a malformed
/// connection string or invalid options.
pub async fn client_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(Client::with_options(options)?)
}

/// Send a `ping` to the deployment, bounded by `timeout`.
pub async fn ping(client: &Client, timeout: Duration) -> DatabaseResult<()> {
    let admin = client.database("admin");
    let command = admin.run_command(doc! { "ping": 1 });

    match tokio::time::timeout(timeout, command).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(DatabaseError::ConnectionFailed(e.to_string())),
        Err(_) => Err(DatabaseError::ConnectionFailed(format!(
            "ping did not complete within {:?}",
            timeout
        ))),
    }
}

/// Connect using a MongoConfig and verify the deployment answers.
///
/// The connectivity check is bounded by `server_selection_timeout_secs`;
/// there is no retry, a failure here is a startup failure.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "productdb");
/// let client = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!(url = %config.redacted_url(), "Connecting to MongoDB");

    let client = client_from_config(config).await?;
    ping(
        &client,
        Duration::from_secs(config.server_selection_timeout_secs),
    )
    .await?;

    info!(database = %config.database, "Connected to MongoDB");
    Ok(client)
}
