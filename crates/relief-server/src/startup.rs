//! Server startup utilities.

use relief_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____       ___       ____   __  __      __
   / __ \___  / (_)__   / __/  / / / /_  __/ /_
  / /_/ / _ \/ / / _ \ / /_   / /_/ / / / / __ \
 / _, _/  __/ / /  __// __/  / __  / /_/ / /_/ /
/_/ |_|\___/_/_/\___//_/    /_/ /_/\__,_/_.___/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let port = config.server.port;
    info!("{}", separator);
    info!("REST API:  http://0.0.0.0:{}/api", port);
    info!("Health:    http://0.0.0.0:{}/health", port);
    info!(
        "Cache:     {} (ttl {}s)",
        if config.cache.enabled { "on" } else { "off" },
        config.cache.ttl_secs
    );
    info!("{}", separator);
}
