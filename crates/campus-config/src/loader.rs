//! Configuration loader with layered sources.

use crate::{AppConfig, DEFAULT_JWT_SECRET, MAX_CACHE_TTL_SECS};
use campus_core::CrmError;
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tracing::{debug, info, warn};

/// Loads [`AppConfig`] from layered sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a loader reading from `config_dir`.
    ///
    /// Sources, later ones winning:
    /// 1. `{config_dir}/default.toml`
    /// 2. `{config_dir}/{environment}.toml`
    /// 3. `{config_dir}/local.toml` (not committed)
    /// 4. Environment variables such as `CAMPUS__DATABASE__URL`
    pub fn new(config_dir: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Loader for the default location (`./config`).
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Loads and validates the configuration.
    pub fn load(&self) -> Result<AppConfig, CrmError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("CAMPUS__APP__ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", self.config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("CAMPUS")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .with_list_parse_key("uploads.allowed_mime_types")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize::<AppConfig>)
            .map_err(config_error_to_crm_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    fn validate_config(config: &AppConfig) -> Result<(), CrmError> {
        if config.app.is_production() && config.security.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("Using default JWT secret in production! This is a security risk.");
        }

        if config.database.url.is_empty() {
            return Err(CrmError::Configuration("Database URL is required".to_string()));
        }

        if config.cache.default_ttl_secs == 0 || config.cache.check_period_secs == 0 {
            return Err(CrmError::Configuration(
                "Cache TTL and check period must be positive".to_string(),
            ));
        }

        if config.cache.default_ttl_secs > MAX_CACHE_TTL_SECS {
            return Err(CrmError::Configuration(format!(
                "Cache TTL must not exceed {MAX_CACHE_TTL_SECS} seconds"
            )));
        }

        if config.security.cookie_name.trim().is_empty() {
            return Err(CrmError::Configuration("Session cookie name is required".to_string()));
        }

        Ok(())
    }
}

fn config_error_to_crm_error(err: ConfigError) -> CrmError {
    CrmError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServerConfig;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.cache.default_ttl_secs, 3600);
        assert_eq!(config.cache.check_period_secs, 600);
        assert_eq!(config.security.cookie_name, "auth_token");
        assert_eq!(config.security.token_ttl_secs, 86_400);
        assert_eq!(config.uploads.max_file_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[cache]\ndefault_ttl_secs = 120\n\n[server]\nport = 9000\n",
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string());
        let config = loader.load().unwrap();

        assert_eq!(config.cache.default_ttl_secs, 120);
        assert_eq!(config.cache.check_period_secs, 600);
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[cache]\ndefault_ttl_secs = 0\n").unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string());
        let err = loader.load().unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_oversized_ttl_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[cache]\ndefault_ttl_secs = 100000000000\n",
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string());
        let err = loader.load().unwrap_err();
        assert!(err.to_string().contains("must not exceed"));
    }
}
