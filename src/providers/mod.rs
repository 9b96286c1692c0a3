//! External providers
//!
//! The orchestrator talks to three unreliable services through these traits:
//! - [`PageFetcher`]: the audited page itself
//! - [`PerformanceProvider`]: a PageSpeed-style performance API
//! - [`ExplanationGenerator`]: a language model that explains the scores
//!
//! Each provider reports its own typed error; deciding which errors are fatal
//! is left to the orchestrator.

mod openai;
mod page;
mod pagespeed;

pub use openai::{build_prompt, ExplanationError, OpenAiExplainer, SYSTEM_PROMPT};
pub use page::{build_http_client, FetchError, HttpPageFetcher};
pub use pagespeed::{PageSpeedClient, PerformanceError};

use crate::audit::AuditMetrics;
use async_trait::async_trait;
use url::Url;

/// Explanation used when the language model gives no usable text
pub const FALLBACK_EXPLANATION: &str = "AI response not available.";

/// Retrieves the raw markup of a page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Measures page performance as a Lighthouse ratio in [0, 1]
#[async_trait]
pub trait PerformanceProvider: Send + Sync {
    async fn measure(&self, url: &Url) -> Result<f64, PerformanceError>;
}

/// Produces natural-language guidance for a set of audit metrics
#[async_trait]
pub trait ExplanationGenerator: Send + Sync {
    async fn explain(&self, metrics: &AuditMetrics<'_>) -> Result<String, ExplanationError>;
}
