use std::sync::Arc;

use tracing::{error, info};

use crate::application::{AuthUseCase, TabularSummaryUseCase, TrendForecastUseCase};
use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::SqliteCredentialStore;
use crate::infrastructure::security::PasswordHasher;
use crate::interfaces::http::HttpState;

/// Build every service once and bundle them for the HTTP layer.
pub async fn build_state(config: &AppConfig) -> Result<HttpState> {
    let store = SqliteCredentialStore::init(&config.database_url, config.database_max_connections)
        .await
        .map_err(|err| {
            error!(error = %err, database_url = %config.database_url, "Failed to open credential store");
            err
        })?;

    let auth_use_case = AuthUseCase::new(
        Arc::new(store),
        PasswordHasher::new(config.password_hash_cost),
        config.token_ttl(),
    );

    let parser_config = config.parser_config()?;
    info!(delimiter = ?parser_config.delimiter, "Tabular parser configured");

    Ok(HttpState {
        auth_use_case,
        summary_use_case: TabularSummaryUseCase::new(&parser_config),
        forecast_use_case: TrendForecastUseCase::new(),
        max_upload_bytes: config.max_upload_bytes,
    })
}
