//! seo-audit: single-page performance and on-page SEO auditor
//!
//! This crate audits one web page at a time. It gathers a performance score
//! from a PageSpeed-style API, extracts on-page SEO facts from the page markup,
//! scores both, and asks a language model to explain the result.

pub mod audit;
pub mod config;
pub mod markup;
pub mod output;
pub mod providers;
pub mod url;

use thiserror::Error;

/// Main error type for audit operations
///
/// Only the first three variants can terminate an audit once it has started;
/// the remaining variants come from constructing providers at startup.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Invalid audit URL: {0}")]
    Validation(#[from] UrlError),

    #[error("Page {url} could not be analyzed: {reason}")]
    PageUnreachable { url: String, reason: String },

    #[error("Explanation quota exceeded: {message}")]
    ExplanationQuotaExceeded { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl AuditError {
    /// HTTP-equivalent status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::ExplanationQuotaExceeded { .. } => 429,
            Self::PageUnreachable { .. } | Self::Config(_) | Self::Client(_) => 500,
        }
    }

    /// Message suitable for showing to the client that requested the audit
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_) => "Please send a valid URL starting with http or https".to_string(),
            Self::ExplanationQuotaExceeded { message } => format!("AI quota exceeded: {}", message),
            Self::PageUnreachable { .. } | Self::Config(_) | Self::Client(_) => {
                "Something went wrong while analyzing the site.".to_string()
            }
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("URL is missing")]
    Empty,

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use audit::{AuditOrchestrator, AuditResult, PageFacts, PerformanceFacts, ScoreSet};
pub use config::Config;
pub use crate::url::validate_audit_url;
