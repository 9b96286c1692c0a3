//! Per-request data model
//!
//! Every value here is created fresh for one audit and dropped with its result.

use serde::{Deserialize, Serialize};

/// On-page SEO signals extracted from the audited markup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFacts {
    pub title: String,
    pub meta_description: String,
    #[serde(rename = "firstH1")]
    pub first_h1: String,
    pub image_count: u32,
    /// Never greater than `image_count`
    pub images_missing_alt: u32,
    pub canonical_url: String,
    pub robots_directive: String,
}

/// Result of the performance provider
///
/// An absent ratio is a normal, recoverable state: the provider failed or
/// reported no performance score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerformanceFacts {
    lighthouse_performance_ratio: Option<f64>,
}

impl PerformanceFacts {
    /// Creates facts from a provider ratio
    ///
    /// Ratios outside [0, 1] (or NaN) are treated as absent.
    pub fn present(ratio: f64) -> Self {
        let ratio = (0.0..=1.0).contains(&ratio).then_some(ratio);
        Self {
            lighthouse_performance_ratio: ratio,
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }

    pub fn ratio(&self) -> Option<f64> {
        self.lighthouse_performance_ratio
    }

    pub fn is_absent(&self) -> bool {
        self.lighthouse_performance_ratio.is_none()
    }
}

/// Derived scores, each in 0..=100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub performance: u8,
    pub seo: u8,
    pub overall: u8,
}

/// Metrics handed to the explanation provider
///
/// Serialized as the JSON document embedded in the model prompt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMetrics<'a> {
    pub url: &'a str,
    pub scores: ScoreSet,
    pub page_facts: &'a PageFacts,
}

/// Complete audit response payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub url: String,
    pub scores: ScoreSet,
    pub page_facts: PageFacts,
    pub explanation: String,
}

impl AuditResult {
    /// Borrows the metrics portion of this result
    pub fn metrics(&self) -> AuditMetrics<'_> {
        AuditMetrics {
            url: &self.url,
            scores: self.scores,
            page_facts: &self.page_facts,
        }
    }
}
