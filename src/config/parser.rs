use crate::config::types::{ApiKeys, Config};
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(content)?;

    // Blank keys in the file behave as if they were absent
    config.performance.api_key = non_blank(config.performance.api_key.take());
    config.explanation.api_key = non_blank(config.explanation.api_key.take());

    validate(&config)?;

    Ok(config)
}

/// Merges externally supplied API keys into the configuration
///
/// Keys passed here win over keys from the file. Blank values are ignored,
/// so an empty environment variable does not erase a key from the file.
pub fn apply_api_keys(config: &mut Config, keys: ApiKeys) {
    if let Some(key) = non_blank(keys.pagespeed) {
        config.performance.api_key = Some(key);
    }
    if let Some(key) = non_blank(keys.openai) {
        config.explanation.api_key = Some(key);
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
