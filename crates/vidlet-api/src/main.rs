use vidlet_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    vidlet_api::telemetry::init_telemetry();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (storage, record store, routes)
    let (_state, router) = vidlet_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    vidlet_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
