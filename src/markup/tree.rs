//! Element tree abstraction
//!
//! The analyzer only needs "find elements by tag, read their attributes and
//! text". [`ElementTree`] captures that, and [`HtmlTree`] provides it on top of
//! the html5ever-based `scraper` parser, which never rejects input.

use scraper::{Html, Selector};

/// Owned snapshot of one element: its attributes and text content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    attributes: Vec<(String, String)>,
    text: String,
}

impl Element {
    pub fn new(attributes: Vec<(String, String)>, text: impl Into<String>) -> Self {
        Self {
            attributes,
            text: text.into(),
        }
    }

    /// Looks up an attribute value; names compare case-insensitively
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Concatenated text of the element and its descendants
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A navigable document that supports lookup by tag name
pub trait ElementTree {
    /// All elements with the given tag, in document order
    fn find_all(&self, tag: &str) -> Vec<Element>;

    /// First element with the given tag
    fn find_first(&self, tag: &str) -> Option<Element> {
        self.find_all(tag).into_iter().next()
    }

    /// First element with the given tag that satisfies `predicate`
    fn find_first_where<F>(&self, tag: &str, predicate: F) -> Option<Element>
    where
        F: Fn(&Element) -> bool,
        Self: Sized,
    {
        self.find_all(tag).into_iter().find(|element| predicate(element))
    }
}

/// HTML document parsed with `scraper`
pub struct HtmlTree {
    document: Html,
}

impl HtmlTree {
    /// Parses markup; malformed input yields a best-effort tree, never an error
    pub fn parse(markup: &str) -> Self {
        Self {
            document: Html::parse_document(markup),
        }
    }
}

impl ElementTree for HtmlTree {
    fn find_all(&self, tag: &str) -> Vec<Element> {
        let selector = match Selector::parse(tag) {
            Ok(selector) => selector,
            Err(_) => return Vec::new(),
        };

        self.document
            .select(&selector)
            .map(|element| {
                let attributes = element
                    .value()
                    .attrs()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect();
                Element::new(attributes, element.text().collect::<String>())
            })
            .collect()
    }
}
