use std::env;
use std::path::Path;

use super::ConfigError;
use super::model::Config;

pub struct AppConfig {
    pub config: Config,
    pub max_name_width: usize,
}

/// Load the application configuration from the YAML file named by the `CONFIG_FILE`
/// environment variable, falling back to `config.yml`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config_file_location =
        env::var("CONFIG_FILE").unwrap_or_else(|_| "config.yml".to_string());
    log::info!("Using config file: {}", config_file_location);
    load_config_from(&config_file_location)
}

/// Load the application configuration from the given YAML file.
/// Fails when the file is unreadable or not valid YAML, when it lists no sources,
/// and when a source polls with a zero interval.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;

    let config: Config = serde_yaml::from_str(&config_str).map_err(|source| ConfigError::Parse {
        path: display.clone(),
        source,
    })?;

    if config.is_empty() {
        return Err(ConfigError::Empty(display));
    }

    if let Some(name) = config
        .iter()
        .find(|(_, source)| source.polling_interval_seconds == 0)
        .map(|(name, _)| name.clone())
    {
        return Err(ConfigError::ZeroInterval(name));
    }

    let max_name_width = config.keys().map(|name| name.len()).max().unwrap_or(10);

    Ok(AppConfig {
        config,
        max_name_width,
    })
}
