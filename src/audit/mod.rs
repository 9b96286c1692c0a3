//! Audit module
//!
//! This module contains the core audit logic:
//! - The per-request data model
//! - Score calculation
//! - Provider outcome classification
//! - The orchestrator that sequences providers for one audit

mod orchestrator;
mod outcome;
mod scoring;
mod types;

pub use orchestrator::{AuditOrchestrator, AuditTimeouts};
pub use outcome::Outcome;
pub use scoring::{calculate_scores, overall_score, performance_score, seo_checks, seo_score};
pub use types::{AuditMetrics, AuditResult, PageFacts, PerformanceFacts, ScoreSet};
