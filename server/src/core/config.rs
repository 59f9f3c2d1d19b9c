//! Application configuration
//!
//! Resolution order, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. JSON config file (explicit `--config` path or `babillages.json` in cwd)
//! 3. CLI arguments / environment variables

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::cli::CliConfig;
use super::constants::{CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT};

/// Server section of the JSON config file
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Database section of the JSON config file
///
/// Every field is optional; anything left out falls back to the pool
/// defaults in `core::constants`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PostgresFileConfig {
    /// Connection URL (BABILLAGES_DATABASE_URL takes precedence)
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
    pub max_lifetime_secs: Option<u64>,
    /// Statement timeout in seconds, 0 to disable
    pub statement_timeout_secs: Option<u64>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub database: Option<PostgresFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Surface probable typos: any top-level key that is not a known section
    fn warn_unknown_fields(&self) {
        let serde_json::Value::Object(map) = &self.extra else {
            return;
        };
        for key in map.keys() {
            tracing::warn!(field = %key, "Unknown field in config file (possible typo)");
        }
    }
}

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Resolved PostgreSQL configuration
///
/// Zero values fall back to the pool defaults in `core::constants`.
#[derive(Debug, Clone, Default)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub statement_timeout_secs: u64,
}

/// Fully resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub postgres: PostgresConfig,
}

impl AppConfig {
    /// Load configuration: defaults, then config file, then CLI/env overrides
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let file = Self::load_file_config(cli)?;
        file.warn_unknown_fields();

        let file_server = file.server.unwrap_or_default();
        let file_db = file.database.unwrap_or_default();

        let server = ServerConfig {
            host: cli
                .host
                .clone()
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT),
        };

        let url = cli
            .database_url
            .clone()
            .or(file_db.url)
            .context("PostgreSQL URL is required (set BABILLAGES_DATABASE_URL or database.url)")?;

        let postgres = PostgresConfig {
            url,
            max_connections: file_db.max_connections.unwrap_or(0),
            min_connections: file_db.min_connections.unwrap_or(0),
            acquire_timeout_secs: file_db.acquire_timeout_secs.unwrap_or(0),
            idle_timeout_secs: file_db.idle_timeout_secs.unwrap_or(0),
            max_lifetime_secs: file_db.max_lifetime_secs.unwrap_or(0),
            statement_timeout_secs: file_db.statement_timeout_secs.unwrap_or(0),
        };

        let config = Self { server, postgres };
        config.validate()?;
        Ok(config)
    }

    fn load_file_config(cli: &CliConfig) -> Result<FileConfig> {
        if let Some(path) = &cli.config {
            return FileConfig::load_from_file(path);
        }
        let default_path = Path::new(CONFIG_FILE_NAME);
        if default_path.exists() {
            return FileConfig::load_from_file(default_path);
        }
        Ok(FileConfig::default())
    }

    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with_url() -> CliConfig {
        CliConfig {
            host: None,
            port: None,
            config: None,
            database_url: Some("postgres://localhost/babillages".to_string()),
        }
    }

    #[test]
    fn test_defaults_apply_without_file_or_flags() {
        let config = AppConfig::load(&cli_with_url()).unwrap();
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        // zero means "use pool default" downstream
        assert_eq!(config.postgres.max_connections, 0);
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let cli = CliConfig {
            host: Some("0.0.0.0".to_string()),
            port: Some(9000),
            ..cli_with_url()
        };
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.postgres.url, "postgres://localhost/babillages");
    }

    #[test]
    fn test_missing_database_url_is_an_error() {
        let cli = CliConfig::default();
        assert!(AppConfig::load(&cli).is_err());
    }

    #[test]
    fn test_port_zero_is_rejected() {
        let cli = CliConfig {
            port: Some(0),
            ..cli_with_url()
        };
        assert!(AppConfig::load(&cli).is_err());
    }

    #[test]
    fn test_unknown_fields_are_captured() {
        let parsed: FileConfig =
            serde_json::from_str(r#"{"server": {"port": 1}, "srever": {}}"#).unwrap();
        let serde_json::Value::Object(map) = &parsed.extra else {
            panic!("expected object");
        };
        assert!(map.contains_key("srever"));
    }
}
