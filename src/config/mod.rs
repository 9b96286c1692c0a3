//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and merging in API keys that arrive from the command line or environment.
//!
//! # Example
//!
//! ```no_run
//! use seo_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seo-audit.toml")).unwrap();
//! println!("Performance strategy: {}", config.performance.strategy);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ApiKeys, Config, ExplanationConfig, PageConfig, PerformanceConfig, DEFAULT_MODEL,
    DEFAULT_OPENAI_ENDPOINT, DEFAULT_PAGESPEED_ENDPOINT, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{apply_api_keys, load_config, parse_config};
pub use validation::validate;
