//! On-page SEO fact extraction
//!
//! # Extraction Rules
//!
//! | Field | Source |
//! |-------|--------|
//! | `title` | trimmed text of the first `<title>` |
//! | `meta_description` | `content` of the first `<meta name="description">` |
//! | `first_h1` | trimmed text of the first `<h1>` |
//! | `image_count` | number of `<img>` elements |
//! | `images_missing_alt` | `<img>` elements with no `alt` or an empty `alt` |
//! | `canonical_url` | `href` of the first `<link rel="canonical">` |
//! | `robots_directive` | `content` of the first `<meta name="robots">` |
//!
//! Anything that cannot be found becomes an empty string or zero.

use crate::audit::PageFacts;
use crate::markup::tree::{Element, ElementTree, HtmlTree};

/// Parses markup and extracts page facts
///
/// # Example
///
/// ```
/// use seo_audit::markup::analyze_markup;
///
/// let facts = analyze_markup(r#"<html><head><title> Pricing </title></head>
///     <body><h1>Plans</h1><img src="a.png"></body></html>"#);
/// assert_eq!(facts.title, "Pricing");
/// assert_eq!(facts.first_h1, "Plans");
/// assert_eq!(facts.images_missing_alt, 1);
/// ```
pub fn analyze_markup(markup: &str) -> PageFacts {
    extract_facts(&HtmlTree::parse(markup))
}

/// Extracts page facts from an already parsed tree
pub fn extract_facts<T: ElementTree>(tree: &T) -> PageFacts {
    let images = tree.find_all("img");
    let images_missing_alt = images.iter().filter(|img| missing_alt(img)).count();

    PageFacts {
        title: first_text(tree, "title"),
        meta_description: named_meta_content(tree, "description"),
        first_h1: first_text(tree, "h1"),
        image_count: saturating_u32(images.len()),
        images_missing_alt: saturating_u32(images_missing_alt),
        canonical_url: canonical_href(tree),
        robots_directive: named_meta_content(tree, "robots"),
    }
}

fn first_text<T: ElementTree>(tree: &T, tag: &str) -> String {
    tree.find_first(tag)
        .map(|element| element.text().trim().to_string())
        .unwrap_or_default()
}

/// `content` of the first `<meta>` whose `name` matches
fn named_meta_content<T: ElementTree>(tree: &T, name: &str) -> String {
    tree.find_first_where("meta", |meta| {
        meta.attr("name")
            .map(|value| value.trim().eq_ignore_ascii_case(name))
            .unwrap_or(false)
    })
    .and_then(|meta| meta.attr("content").map(str::to_string))
    .unwrap_or_default()
}

/// `href` of the first `<link>` whose `rel` tokens include "canonical"
fn canonical_href<T: ElementTree>(tree: &T) -> String {
    tree.find_first_where("link", |link| {
        link.attr("rel")
            .map(|rel| {
                rel.split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("canonical"))
            })
            .unwrap_or(false)
    })
    .and_then(|link| link.attr("href").map(str::to_string))
    .unwrap_or_default()
}

fn missing_alt(img: &Element) -> bool {
    img.attr("alt").map_or(true, str::is_empty)
}

fn saturating_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
