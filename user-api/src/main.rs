use user_api_core::{init_tracing, AppConfig, UserApi};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::load("dev")?;
    tracing::info!(profile = config.profile(), "configuration loaded");

    let api = UserApi::from_config(&config)?;
    tracing::info!(users = api.registry().count().await, "registry ready");

    api.serve().await
}
