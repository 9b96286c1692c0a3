//! PageSpeed Insights performance provider
//!
//! Queries `runPagespeed` for a Lighthouse audit and reads
//! `lighthouseResult.categories.performance.score`.

use crate::config::PerformanceConfig;
use crate::providers::PerformanceProvider;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors from the performance provider
///
/// None of these abort an audit; they all end up as an absent score.
#[derive(Debug, Error)]
pub enum PerformanceError {
    #[error("PageSpeed API key is not configured")]
    MissingApiKey,

    #[error("PageSpeed request failed: {0}")]
    Http(reqwest::Error),

    #[error("PageSpeed returned HTTP {0}")]
    Status(StatusCode),

    #[error("PageSpeed response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("PageSpeed response has no performance score")]
    MissingScore,

    #[error("PageSpeed performance score {0} is outside [0, 1]")]
    OutOfRange(f64),
}

impl From<reqwest::Error> for PerformanceError {
    fn from(error: reqwest::Error) -> Self {
        // The request URL carries the API key
        Self::Http(error.without_url())
    }
}

#[derive(Debug, Deserialize)]
struct PageSpeedResponse {
    #[serde(rename = "lighthouseResult")]
    lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Deserialize)]
struct LighthouseResult {
    categories: Option<Categories>,
}

#[derive(Debug, Deserialize)]
struct Categories {
    performance: Option<Category>,
}

#[derive(Debug, Deserialize)]
struct Category {
    score: Option<f64>,
}

/// [`PerformanceProvider`] for the PageSpeed Insights v5 API
pub struct PageSpeedClient {
    http: Client,
    endpoint: String,
    strategy: String,
    api_key: Option<String>,
}

impl PageSpeedClient {
    pub fn new(config: &PerformanceConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        if config.api_key.is_none() {
            tracing::warn!("PAGESPEED_API_KEY is not set; performance scores will be 0");
        }

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            strategy: config.strategy.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl PerformanceProvider for PageSpeedClient {
    async fn measure(&self, url: &Url) -> Result<f64, PerformanceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(PerformanceError::MissingApiKey)?;

        tracing::debug!(strategy = %self.strategy, "PageSpeed request for {}", url);

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("url", url.as_str()),
                ("key", api_key),
                ("strategy", self.strategy.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PerformanceError::Status(status));
        }

        let body = response.text().await?;
        parse_performance_score(&body)
    }
}

/// Reads the Lighthouse performance ratio from a PageSpeed response body
pub(crate) fn parse_performance_score(body: &str) -> Result<f64, PerformanceError> {
    let parsed: PageSpeedResponse = serde_json::from_str(body)?;

    let score = parsed
        .lighthouse_result
        .and_then(|result| result.categories)
        .and_then(|categories| categories.performance)
        .and_then(|performance| performance.score)
        .ok_or(PerformanceError::MissingScore)?;

    if !(0.0..=1.0).contains(&score) {
        return Err(PerformanceError::OutOfRange(score));
    }

    Ok(score)
}
