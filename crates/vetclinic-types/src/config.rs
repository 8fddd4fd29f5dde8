//! Configuration types for the clinic service.
//!
//! `ClinicConfig` represents the top-level `config.toml` in the data
//! directory. Every field has a default, so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.vetclinic/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicConfig {
    /// SQLite URL. Defaults to `vetclinic.db` inside the data directory.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Insert the demo roster when the database has no veterinarians.
    #[serde(default = "default_seed_on_startup")]
    pub seed_on_startup: bool,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_seed_on_startup() -> bool {
    true
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            seed_on_startup: default_seed_on_startup(),
            server: ServerConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

/// REST listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Bridge tracing spans to OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub otel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ClinicConfig::default();
        assert!(config.database_url.is_none());
        assert!(config.seed_on_startup);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5080);
        assert!(!config.telemetry.otel);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: ClinicConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClinicConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: ClinicConfig = toml::from_str(
            r#"
seed_on_startup = false

[server]
port = 9000
"#,
        )
        .unwrap();
        assert!(!config.seed_on_startup);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
