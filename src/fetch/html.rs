// src/fetch/html.rs
// =============================================================================
// This module finds <img> elements in HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Each <img> becomes an ImageElement: a plain map from attribute name to
// value. Looking up an attribute that isn't there gives back "" (empty
// string), and callers treat "" as "absent".
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashMap;

// One <img> tag and its attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageElement {
    attrs: HashMap<String, String>,
}

impl ImageElement {
    pub fn from_attrs<'a>(attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            attrs: attrs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Value of attribute `name`, or "" when the element doesn't have it
    pub fn attr(&self, name: &str) -> &str {
        self.attrs.get(name).map(String::as_str).unwrap_or("")
    }

    /// Shorthand for attr("src")
    pub fn src(&self) -> &str {
        self.attr("src")
    }
}

// Extracts every <img> element from an HTML page, in document order
//
// Example:
//   html = "<img src='/a.png'><img alt='no source'>"
//   result = [ {src: "/a.png"}, {alt: "no source"} ]
pub fn extract_images(html: &str) -> Vec<ImageElement> {
    let document = Html::parse_document(html);

    // Our selector is a constant and known to be valid
    let selector = Selector::parse("img").unwrap();

    document
        .select(&selector)
        .map(|element| ImageElement::from_attrs(element.value().attrs()))
        .collect()
}

// Checks whether a Content-Type header value describes an HTML document
//
// Only the media type counts; parameters like "; charset=utf-8" are ignored
// and the comparison is case-insensitive.
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|media_type| media_type.trim().eq_ignore_ascii_case("text/html"))
        .unwrap_or(false)
}
