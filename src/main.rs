use anyhow::Result;
use storefront::config::AppConfig;
use storefront::server::ServerBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        address = %config.server.address(),
        per_page = config.pagination.per_page(),
        "starting storefront"
    );

    ServerBuilder::new().with_config(config).serve().await
}
