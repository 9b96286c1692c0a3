//! Score calculation
//!
//! The scoring policy is fixed:
//!
//! | Score | Rule |
//! |-------|------|
//! | performance | round(ratio × 100), or 0 when the ratio is absent |
//! | seo | 25 per passing check (4 checks); 40 when no check passes |
//! | overall | round(performance × 0.5 + seo × 0.5) |
//!
//! Rounding is round-half-up, so an overall of 56.5 becomes 57.

use crate::audit::types::{PageFacts, PerformanceFacts, ScoreSet};
use std::ops::RangeInclusive;

const CHECK_WEIGHT: u32 = 25;
const SEO_FLOOR: u8 = 40;
const TITLE_LENGTH: RangeInclusive<usize> = 10..=60;
const META_DESCRIPTION_LENGTH: RangeInclusive<usize> = 50..=160;

/// Computes the full score set for one audit
pub fn calculate_scores(performance: &PerformanceFacts, page: &PageFacts) -> ScoreSet {
    let performance = performance_score(performance);
    let seo = seo_score(page);

    ScoreSet {
        performance,
        seo,
        overall: overall_score(performance, seo),
    }
}

/// Performance score in 0..=100
pub fn performance_score(facts: &PerformanceFacts) -> u8 {
    match facts.ratio() {
        // ratio is clamped to [0, 1] by PerformanceFacts, so this fits in u8
        Some(ratio) => (ratio * 100.0).round() as u8,
        None => 0,
    }
}

/// SEO score in 0..=100
pub fn seo_score(page: &PageFacts) -> u8 {
    let passed = seo_checks(page).iter().filter(|passed| **passed).count() as u32;

    if passed == 0 {
        SEO_FLOOR
    } else {
        (passed * CHECK_WEIGHT) as u8
    }
}

/// Evaluates the four SEO checks in order: title, meta description, H1, image alt text
pub fn seo_checks(page: &PageFacts) -> [bool; 4] {
    [
        TITLE_LENGTH.contains(&page.title.chars().count()),
        META_DESCRIPTION_LENGTH.contains(&page.meta_description.chars().count()),
        !page.first_h1.is_empty(),
        alt_text_coverage_ok(page.image_count, page.images_missing_alt),
    ]
}

/// True when there is at least one image and under 30% of them lack alt text
fn alt_text_coverage_ok(image_count: u32, missing_alt: u32) -> bool {
    // missing / count < 0.3, kept in integers to avoid float edge cases
    image_count > 0 && u64::from(missing_alt) * 10 < u64::from(image_count) * 3
}

/// Equal-weight average of performance and SEO, rounded half up
pub fn overall_score(performance: u8, seo: u8) -> u8 {
    ((u16::from(performance) + u16::from(seo) + 1) / 2) as u8
}
