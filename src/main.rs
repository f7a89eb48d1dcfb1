use env_logger::Builder;
use log::LevelFilter;
use petclinic_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Info by default with sqlx debug logs suppressed; RUST_LOG refines both
    let mut logger = Builder::new();
    logger
        .filter_level(LevelFilter::Info)
        .filter_module("sqlx", LevelFilter::Warn);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    let config = AppConfig::load()?;
    log::info!(
        "Configuration loaded: server={}, in_memory={}, seed={}",
        config.server_address(),
        config.database.in_memory,
        config.seed.enabled
    );

    petclinic_api::run_server(config).await
}
