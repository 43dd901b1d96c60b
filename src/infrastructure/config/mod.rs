use crate::domain::csv::{DelimiterMode, ParserConfig};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::security::{MAX_COST, MIN_COST};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Default location of the optional TOML config file
pub const DEFAULT_CONFIG_FILE: &str = "trendboard.toml";

/// Process configuration, resolved once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    /// Single origin allowed by CORS, or `*` for any
    pub cors_origin: String,
    pub token_ttl_minutes: i64,
    /// bcrypt cost factor
    pub password_hash_cost: u32,
    pub max_upload_bytes: usize,
    /// `,` `;` `|` `tab` or `auto`
    pub csv_delimiter: String,
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            database_url: "sqlite://trendboard.db".to_string(),
            database_max_connections: 5,
            cors_origin: "http://localhost:3000".to_string(),
            token_ttl_minutes: 15,
            password_hash_cost: bcrypt::DEFAULT_COST,
            max_upload_bytes: 10 * 1024 * 1024,
            csv_delimiter: ",".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env`, then layer defaults, the TOML file, `DATABASE_URL` and
    /// `TRENDBOARD_*` variables (later wins).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path =
            std::env::var("TRENDBOARD_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let config: Self = Self::figment(&path)
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn figment(path: &str) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::raw().only(&["DATABASE_URL"]))
            .merge(Env::prefixed("TRENDBOARD_").ignore(&["CONFIG"]))
    }

    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(AppError::ValidationError("port must be > 0".to_string()));
        }
        if self.token_ttl_minutes <= 0 {
            return Err(AppError::ValidationError(
                "token_ttl_minutes must be > 0".to_string(),
            ));
        }
        if !(MIN_COST..=MAX_COST).contains(&self.password_hash_cost) {
            return Err(AppError::ValidationError(format!(
                "password_hash_cost must be between {} and {}",
                MIN_COST, MAX_COST
            )));
        }
        if self.max_upload_bytes == 0 {
            return Err(AppError::ValidationError(
                "max_upload_bytes must be > 0".to_string(),
            ));
        }
        self.delimiter()?;
        Ok(())
    }

    pub fn delimiter(&self) -> Result<DelimiterMode> {
        self.csv_delimiter
            .parse()
            .map_err(AppError::ValidationError)
    }

    pub fn parser_config(&self) -> Result<ParserConfig> {
        Ok(ParserConfig::new().with_delimiter(self.delimiter()?))
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.token_ttl_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> AppConfig {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string(toml))
            .extract()
            .unwrap()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.port, 5001);
        assert_eq!(config.delimiter().unwrap(), DelimiterMode::Fixed(b','));
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = from_toml("port = 8080\ncsv_delimiter = \"auto\"\n");
        assert_eq!(config.port, 8080);
        assert_eq!(config.delimiter().unwrap(), DelimiterMode::Auto);
        assert_eq!(config.token_ttl_minutes, 15);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = AppConfig {
            token_ttl_minutes: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            csv_delimiter: "::".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_password_cost_range() {
        for cost in [0, 3, 32] {
            let config = AppConfig {
                password_hash_cost: cost,
                ..AppConfig::default()
            };
            assert!(config.validate().is_err(), "cost {} accepted", cost);
        }

        let config = from_toml("password_hash_cost = 4\n");
        assert!(config.validate().is_ok());
    }
}
