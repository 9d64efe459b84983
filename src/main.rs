use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotwise_api::config::ApiConfig;
use slotwise_db::{create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    let db_pool = create_pool(&config.database_url).await?;
    initialize_database(&db_pool).await?;

    slotwise_api::start_server(config, db_pool).await?;

    Ok(())
}
