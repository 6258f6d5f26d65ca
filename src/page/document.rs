//! Parsed page snapshots
//!
//! A [`Document`] is the read side of the Page Access layer: element queries,
//! attribute reads and rendered text over one fetched page.

use crate::error::{ExtractionError, NavigationError, Result};
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// HTML of a page as captured by a [`PageAccess`](super::PageAccess) backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    /// Final URL after any redirects
    pub url: String,
    /// Serialized document
    pub html: String,
}

impl RawPage {
    /// Create a raw page
    pub fn new<U: Into<String>, H: Into<String>>(url: U, html: H) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

/// A parsed page with its base URL
pub struct Document {
    url: Url,
    html: Html,
}

impl Document {
    /// Parse a captured page
    pub fn parse(raw: &RawPage) -> Result<Self> {
        let url = Url::parse(&raw.url)
            .map_err(|e| NavigationError::InvalidUrl(format!("{}: {}", raw.url, e)))?;
        Ok(Self {
            url,
            html: Html::parse_document(&raw.html),
        })
    }

    /// Page URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// All elements matching a CSS selector, in document order
    pub fn select_all(&self, selector: &str) -> Result<Vec<ElementRef<'_>>> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).collect())
    }

    /// First element whose `id` attribute equals `id`
    pub fn element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().id() == Some(id))
    }

    /// Resolve an attribute value against the page URL.
    ///
    /// Values that do not form a valid URL are returned unchanged.
    pub fn resolve(&self, reference: &str) -> String {
        resolve_against(&self.url, reference)
    }
}

/// Resolve `reference` against `base`, keeping it verbatim when it cannot be joined
pub fn resolve_against(base: &Url, reference: &str) -> String {
    base.join(reference)
        .map(String::from)
        .unwrap_or_else(|_| reference.to_string())
}

/// Parse a CSS selector into an [`ExtractionError`] on failure
pub fn parse_selector(selector: &str) -> std::result::Result<Selector, ExtractionError> {
    Selector::parse(selector)
        .map_err(|e| ExtractionError::InvalidSelector(format!("'{}': {}", selector, e)))
}

/// Rendered text of an element, close to what a browser shows.
///
/// Hidden elements (`display:none`, `hidden`, `script`, `style`) are skipped,
/// `br` counts as whitespace, and whitespace runs collapse to one space.
pub fn rendered_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_rendered(element, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_rendered(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push(' '),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child).filter(|el| !is_hidden(*el)) {
                    push_rendered(child, out);
                }
            }
            _ => {}
        }
    }
}

fn is_hidden(element: ElementRef<'_>) -> bool {
    let el = element.value();
    if matches!(el.name(), "script" | "style" | "template") || el.attr("hidden").is_some() {
        return true;
    }
    el.attr("style").is_some_and(|style| {
        style.split(';').any(|decl| match decl.split_once(':') {
            Some((property, value)) => {
                property.trim().eq_ignore_ascii_case("display")
                    && value.trim().eq_ignore_ascii_case("none")
            }
            None => false,
        })
    })
}

/// Attribute value, treating empty strings as absent
pub fn non_empty_attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
