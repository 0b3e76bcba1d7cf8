//! # Relief Hub Server
//!
//! Main entry point for the Relief Hub REST backend.

use relief_config::{validate_config, ConfigLoader, ObservabilityConfig};
use relief_core::ReliefResult;
use relief_rest::middleware::cache_metrics;
use relief_server::{startup, Application};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let config_loader = match ConfigLoader::from_default_location() {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config_loader.get().await.observability);

    info!("Starting Relief Hub Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config_loader).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config_loader: ConfigLoader) -> ReliefResult<()> {
    let config = config_loader.get().await;
    validate_config(&config)?;

    info!("Environment: {}", config.app.environment);
    startup::print_banner();

    cache_metrics::register_metrics();

    let app = Application::build(&config).await?;
    startup::print_startup_info(&config);
    app.serve().await
}

fn init_logging(config: &ObservabilityConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}
