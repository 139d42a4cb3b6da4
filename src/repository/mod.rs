pub mod counter_repo;
pub mod lead_repo;
pub mod quotation_repo;
pub mod repository_error;
pub mod task_repo;
pub mod user_repo;

use crate::config::mongo_conf::MongoConfig;
use mongodb::{options::ClientOptions, Client, Database};

/// Opens a database handle from the shared Mongo configuration.
///
/// Every repository builds its typed collection from the handle returned
/// here, so pool sizing and timeouts are configured in one place.
pub async fn connect_database(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse(&config.uri).await?;
    client_options.app_name = Some("crm-backend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(
        config.connection_timeout_secs,
    ));

    let client = Client::with_options(client_options)?;
    Ok(client.database(&config.database))
}
