use crate::config::types::{Config, ExplanationConfig, PageConfig, PerformanceConfig};
use crate::ConfigError;
use url::Url;

const MAX_TIMEOUT_SECS: u64 = 600;
const STRATEGIES: &[&str] = &["mobile", "desktop"];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_page_config(&config.page)?;
    validate_performance_config(&config.performance)?;
    validate_explanation_config(&config.explanation)?;
    Ok(())
}

fn validate_page_config(config: &PageConfig) -> Result<(), ConfigError> {
    validate_timeout("page.timeout-secs", config.timeout_secs)?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "page.user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_performance_config(config: &PerformanceConfig) -> Result<(), ConfigError> {
    validate_timeout("performance.timeout-secs", config.timeout_secs)?;
    validate_endpoint("performance.endpoint", &config.endpoint)?;

    if !STRATEGIES.contains(&config.strategy.as_str()) {
        return Err(ConfigError::Validation(format!(
            "performance.strategy must be one of {:?}, got '{}'",
            STRATEGIES, config.strategy
        )));
    }

    Ok(())
}

fn validate_explanation_config(config: &ExplanationConfig) -> Result<(), ConfigError> {
    validate_timeout("explanation.timeout-secs", config.timeout_secs)?;
    validate_endpoint("explanation.endpoint", &config.endpoint)?;

    if config.model.trim().is_empty() {
        return Err(ConfigError::Validation(
            "explanation.model cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_timeout(field: &str, secs: u64) -> Result<(), ConfigError> {
    if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            field, MAX_TIMEOUT_SECS, secs
        )));
    }
    Ok(())
}

fn validate_endpoint(field: &str, endpoint: &str) -> Result<(), ConfigError> {
    let url = Url::parse(endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use HTTP or HTTPS, got '{}'",
            field, endpoint
        )));
    }

    Ok(())
}
