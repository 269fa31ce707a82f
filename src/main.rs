use anyhow::{Context, Result};
use nl_query_engine::logging::init_logging;
use nl_query_engine::store::prepare_database;
use nl_query_engine::web::start_server;
use nl_query_engine::{AppConfig, QueryEngine};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging("info");

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        "Using model '{}' at {}, database {}",
        config.llm.model,
        config.llm.base_url,
        config.database.path.display()
    );

    if config.database.seed_on_startup {
        prepare_database(&config.database.path)?;
    }

    let engine = QueryEngine::from_config(&config);
    start_server(engine, &config.server).await
}
