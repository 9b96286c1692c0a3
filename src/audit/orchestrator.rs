//! Audit orchestrator - sequences providers for one audit
//!
//! # Request Flow
//!
//! ```text
//! Validate -> { FetchPerformance, FetchAndAnalyzePage } -> Score -> Explain -> Respond
//! ```
//!
//! # Failure Policy
//!
//! | Step | Provider failure or timeout |
//! |------|-----------------------------|
//! | Validate | Reject, no provider is called |
//! | FetchPerformance | Absent score, audit continues |
//! | FetchAndAnalyzePage | Audit fails (`PageUnreachable`) |
//! | Explain (quota) | Audit fails (`ExplanationQuotaExceeded`) |
//! | Explain (other) | Fallback text, audit continues |
//!
//! Each provider is called at most once per audit; nothing is retried.

use crate::audit::outcome::Outcome;
use crate::audit::scoring::calculate_scores;
use crate::audit::types::{AuditMetrics, AuditResult, PageFacts, PerformanceFacts, ScoreSet};
use crate::config::Config;
use crate::markup::analyze_markup;
use crate::providers::{
    ExplanationError, ExplanationGenerator, HttpPageFetcher, OpenAiExplainer, PageFetcher,
    PageSpeedClient, PerformanceProvider, FALLBACK_EXPLANATION,
};
use crate::url::validate_audit_url;
use crate::AuditError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use url::Url;

/// Upper bounds for each provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditTimeouts {
    pub page: Duration,
    pub performance: Duration,
    pub explanation: Duration,
}

impl Default for AuditTimeouts {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for AuditTimeouts {
    fn from(config: &Config) -> Self {
        Self {
            page: Duration::from_secs(config.page.timeout_secs),
            performance: Duration::from_secs(config.performance.timeout_secs),
            explanation: Duration::from_secs(config.explanation.timeout_secs),
        }
    }
}

/// Runs audits against a fixed set of providers
///
/// Providers are built once and shared by every audit; no state is kept
/// between audits.
pub struct AuditOrchestrator {
    page_fetcher: Arc<dyn PageFetcher>,
    performance: Arc<dyn PerformanceProvider>,
    explainer: Arc<dyn ExplanationGenerator>,
    timeouts: AuditTimeouts,
}

impl AuditOrchestrator {
    /// Creates an orchestrator with default timeouts
    pub fn new(
        page_fetcher: Arc<dyn PageFetcher>,
        performance: Arc<dyn PerformanceProvider>,
        explainer: Arc<dyn ExplanationGenerator>,
    ) -> Self {
        Self {
            page_fetcher,
            performance,
            explainer,
            timeouts: AuditTimeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: AuditTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Builds the HTTP providers described by `config`
    ///
    /// Missing API keys are not an error here: the affected provider logs a
    /// warning and degrades on every audit.
    pub fn from_config(config: &Config) -> Result<Self, AuditError> {
        let page_fetcher = HttpPageFetcher::new(&config.page)?;
        let performance = PageSpeedClient::new(&config.performance)?;
        let explainer = OpenAiExplainer::new(&config.explanation)?;

        Ok(Self::new(
            Arc::new(page_fetcher),
            Arc::new(performance),
            Arc::new(explainer),
        )
        .with_timeouts(AuditTimeouts::from(config)))
    }

    /// Audits a single URL
    ///
    /// # Returns
    ///
    /// * `Ok(AuditResult)` - Audit completed, possibly with degraded data
    /// * `Err(AuditError::Validation)` - The URL was rejected before any provider call
    /// * `Err(AuditError::PageUnreachable)` - The page could not be fetched
    /// * `Err(AuditError::ExplanationQuotaExceeded)` - The language model refused for quota reasons
    pub async fn perform_audit(&self, raw_url: &str) -> Result<AuditResult, AuditError> {
        let url = match validate_audit_url(raw_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Rejected audit request for {:?}: {}", raw_url, e);
                return Err(e.into());
            }
        };

        let start_time = Instant::now();
        tracing::info!("Starting audit of {}", url);

        // A page failure ends the join early and drops the performance call
        let (performance, page_facts) = tokio::try_join!(
            async { Ok::<_, AuditError>(self.resolve_performance(&url).await) },
            self.resolve_page(&url),
        )?;

        let scores = calculate_scores(&performance, &page_facts);
        tracing::debug!(
            "Scores for {}: performance={}, seo={}, overall={}",
            url,
            scores.performance,
            scores.seo,
            scores.overall
        );

        let explanation = self.resolve_explanation(&url, scores, &page_facts).await?;

        tracing::info!(
            "Audit of {} completed in {:?} (overall score {})",
            url,
            start_time.elapsed(),
            scores.overall
        );

        Ok(AuditResult {
            url: url.to_string(),
            scores,
            page_facts,
            explanation,
        })
    }

    async fn performance_outcome(&self, url: &Url) -> Outcome<PerformanceFacts> {
        match timeout(self.timeouts.performance, self.performance.measure(url)).await {
            Ok(Ok(ratio)) => Outcome::Ready(PerformanceFacts::present(ratio)),
            Ok(Err(e)) => Outcome::degraded(e.to_string()),
            Err(_) => Outcome::degraded(format!(
                "timed out after {:?}",
                self.timeouts.performance
            )),
        }
    }

    async fn resolve_performance(&self, url: &Url) -> PerformanceFacts {
        match self.performance_outcome(url).await {
            Outcome::Ready(facts) => facts,
            Outcome::Degraded { reason } => {
                tracing::warn!("Performance score unavailable for {}: {}", url, reason);
                PerformanceFacts::absent()
            }
            // Performance data is optional, so even a fatal outcome only degrades
            Outcome::Fatal(e) => {
                tracing::warn!("Performance provider failed for {}: {}", url, e);
                PerformanceFacts::absent()
            }
        }
    }

    async fn page_outcome(&self, url: &Url) -> Outcome<PageFacts> {
        let markup = match timeout(self.timeouts.page, self.page_fetcher.fetch(url)).await {
            Ok(Ok(markup)) => markup,
            Ok(Err(e)) => return Outcome::Fatal(page_unreachable(url, e.to_string())),
            Err(_) => {
                return Outcome::Fatal(page_unreachable(
                    url,
                    format!("timed out after {:?}", self.timeouts.page),
                ))
            }
        };

        Outcome::Ready(analyze_markup(&markup))
    }

    async fn resolve_page(&self, url: &Url) -> Result<PageFacts, AuditError> {
        match self.page_outcome(url).await {
            Outcome::Ready(facts) => Ok(facts),
            Outcome::Degraded { reason } => {
                tracing::error!("Page {} could not be analyzed: {}", url, reason);
                Err(page_unreachable(url, reason))
            }
            Outcome::Fatal(e) => {
                tracing::error!("{}", e);
                Err(e)
            }
        }
    }

    async fn explanation_outcome(&self, metrics: &AuditMetrics<'_>) -> Outcome<String> {
        match timeout(self.timeouts.explanation, self.explainer.explain(metrics)).await {
            Ok(Ok(text)) if text.trim().is_empty() => Outcome::degraded("empty response"),
            Ok(Ok(text)) => Outcome::Ready(text),
            Ok(Err(ExplanationError::QuotaExceeded { message })) => {
                Outcome::Fatal(AuditError::ExplanationQuotaExceeded { message })
            }
            Ok(Err(e)) => Outcome::degraded(e.to_string()),
            Err(_) => Outcome::degraded(format!(
                "timed out after {:?}",
                self.timeouts.explanation
            )),
        }
    }

    async fn resolve_explanation(
        &self,
        url: &Url,
        scores: ScoreSet,
        page_facts: &PageFacts,
    ) -> Result<String, AuditError> {
        let url_string = url.to_string();
        let metrics = AuditMetrics {
            url: &url_string,
            scores,
            page_facts,
        };

        match self.explanation_outcome(&metrics).await {
            Outcome::Ready(text) => Ok(text),
            Outcome::Degraded { reason } => {
                tracing::warn!("Explanation unavailable for {}: {}", url, reason);
                Ok(FALLBACK_EXPLANATION.to_string())
            }
            Outcome::Fatal(e) => {
                tracing::error!("Explanation failed for {}: {}", url, e);
                Err(e)
            }
        }
    }
}

fn page_unreachable(url: &Url, reason: String) -> AuditError {
    AuditError::PageUnreachable {
        url: url.to_string(),
        reason,
    }
}
