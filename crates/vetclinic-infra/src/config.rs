//! Configuration loader for the clinic service.
//!
//! Reads `config.toml` from the data directory (`~/.vetclinic/` by default)
//! and deserializes it into [`ClinicConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use vetclinic_types::config::ClinicConfig;

use crate::sqlite::pool::default_database_url;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "VETCLINIC_DATA_DIR";

/// Resolve the data directory.
///
/// Priority:
/// 1. `VETCLINIC_DATA_DIR` environment variable
/// 2. `~/.vetclinic`
/// 3. `./.vetclinic`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".vetclinic");
    }

    PathBuf::from(".vetclinic")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClinicConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
pub async fn load_clinic_config(data_dir: &Path) -> ClinicConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClinicConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClinicConfig::default();
        }
    };

    match toml::from_str::<ClinicConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClinicConfig::default()
        }
    }
}

/// The configured database URL, or the default file in `data_dir`.
pub fn resolve_database_url(config: &ClinicConfig, data_dir: &Path) -> String {
    config
        .database_url
        .clone()
        .unwrap_or_else(|| default_database_url(data_dir))
}
