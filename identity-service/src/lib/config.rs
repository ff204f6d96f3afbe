use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Required when `backend = "postgres"`
    pub database_url: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    /// Signing secret; a random key is generated at startup when absent
    pub secret: Option<String>,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

/// Longest accepted token lifetime (30 days).
pub const MAX_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

fn default_ttl_seconds() -> i64 {
    auth::Authenticator::DEFAULT_TOKEN_TTL_SECONDS
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SERVER__HTTP_PORT, JWT__TTL_SECONDS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: STORAGE__DATABASE_URL=postgres://... overrides storage.database_url
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Postgres && self.storage.database_url.is_none()
        {
            return Err(ConfigError::Message(
                "storage.database_url is required for the postgres backend".to_string(),
            ));
        }

        if self.jwt.ttl_seconds <= 0 || self.jwt.ttl_seconds > MAX_TTL_SECONDS {
            return Err(ConfigError::Message(format!(
                "jwt.ttl_seconds must be between 1 and {}",
                MAX_TTL_SECONDS
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server: ServerConfig { http_port: 8080 },
            storage: StorageConfig::default(),
            jwt: JwtConfig::default(),
        }
    }

    #[test]
    fn test_defaults() {
        let config = base_config();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.jwt.ttl_seconds, 3600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let mut config = base_config();
        config.storage.backend = StorageBackend::Postgres;
        assert!(config.validate().is_err());

        config.storage.database_url = Some("postgresql://localhost/identity".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_ttl() {
        let mut config = base_config();
        config.jwt.ttl_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_ttl() {
        let mut config = base_config();

        config.jwt.ttl_seconds = MAX_TTL_SECONDS;
        assert!(config.validate().is_ok());

        config.jwt.ttl_seconds = MAX_TTL_SECONDS + 1;
        assert!(config.validate().is_err());

        config.jwt.ttl_seconds = 10_000_000_000_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let mut config = base_config();
        config.jwt.secret = Some("super-secret-value".to_string());
        assert!(!format!("{:?}", config).contains("super-secret-value"));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let config: Config = ConfigBuilder::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                http_port = 9000

                [storage]
                backend = "postgres"
                database_url = "postgresql://localhost/identity"

                [jwt]
                ttl_seconds = 600
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.http_port, 9000);
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.jwt.ttl_seconds, 600);
        assert!(config.jwt.secret.is_none());
    }
}
