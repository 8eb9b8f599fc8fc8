pub mod init;
mod schema;

pub use schema::{ApiConfig, Config};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Overrides `api.base_url` when set
pub const API_URL_ENV: &str = "ARCHETYPE_QUIZ_API_URL";

/// Get the config directory path (~/.config/archetype-quiz/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("archetype-quiz")
}

/// Get the default config file path (~/.config/archetype-quiz/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// With `path` None the default location is used, and a missing file there
/// just means defaults. An explicit path that does not exist is an error.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    parse_config(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))
}

pub fn parse_config(yaml: &str) -> Result<Config> {
    let config: Config = serde_saphyr::from_str(yaml)?;
    Ok(config)
}

/// Apply environment overrides on top of the file config
pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = std::env::var(API_URL_ENV) {
        let url = url.trim();
        if !url.is_empty() {
            tracing::debug!(%url, "api.base_url overridden from environment");
            config.api.base_url = url.to_string();
        }
    }
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let url = config.api.base_url.trim();
    if url.is_empty() {
        errors.push("api.base_url: must not be empty".to_string());
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!(
            "api.base_url: '{}' must start with http:// or https://",
            url
        ));
    }

    match config.api.timeout_duration() {
        Ok(d) if d.is_zero() => errors.push("api.timeout: must be greater than zero".to_string()),
        Ok(_) => {}
        Err(e) => errors.push(format!(
            "api.timeout: invalid duration '{}' - {}",
            config.api.timeout, e
        )),
    }

    if let Some(dir) = &config.data_dir {
        if dir.as_os_str().is_empty() {
            errors.push("data_dir: must not be empty when set".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
