use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::bootstrap::build_state;
use crate::infrastructure::config::AppConfig;
use crate::interfaces::http::start_server;

fn to_io(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

pub async fn run() -> std::io::Result<()> {
    let config = AppConfig::load().map_err(to_io)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let state = build_state(&config).await.map_err(to_io)?;

    info!(host = %config.host, port = config.port, "Starting trendboard API");
    start_server(state, &config)?.await
}
