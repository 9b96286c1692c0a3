//! Markup analysis module
//!
//! This module turns fetched page markup into [`PageFacts`](crate::audit::PageFacts):
//! - A tolerant element tree over the `scraper` HTML parser
//! - Extraction of title, meta tags, headings, images, and canonical link

mod analyzer;
mod tree;

pub use analyzer::{analyze_markup, extract_facts};
pub use tree::{Element, ElementTree, HtmlTree};
