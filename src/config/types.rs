use serde::Deserialize;

pub const DEFAULT_PAGESPEED_ENDPOINT: &str =
    "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_USER_AGENT: &str = concat!(
    "seo-audit/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/seo-audit/seo-audit)"
);

/// Main configuration structure
///
/// Every section is optional; a missing section falls back to its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub performance: PerformanceConfig,
    pub explanation: ExplanationConfig,
}

/// Settings for fetching the audited page itself
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Upper bound on the whole page fetch (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User agent sent to the audited site
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Settings for the PageSpeed performance provider
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Full URL of the runPagespeed endpoint
    pub endpoint: String,

    /// Lighthouse strategy, "mobile" or "desktop"
    pub strategy: String,

    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// API key; usually supplied through PAGESPEED_API_KEY instead
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PAGESPEED_ENDPOINT.to_string(),
            strategy: "mobile".to_string(),
            timeout_secs: 60,
            api_key: None,
        }
    }
}

/// Settings for the language-model explanation provider
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExplanationConfig {
    /// Base URL of an OpenAI-compatible API (without `/responses`)
    pub endpoint: String,

    pub model: String,

    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// API key; usually supplied through OPENAI_API_KEY instead
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,
}

impl Default for ExplanationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OPENAI_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 60,
            api_key: None,
        }
    }
}

/// API keys supplied outside the config file (CLI flags or environment)
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    pub pagespeed: Option<String>,
    pub openai: Option<String>,
}
