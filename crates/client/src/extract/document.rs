//! Queryable product page built on scraper.
//!
//! Text reads follow one rule everywhere: the text nodes of every matched
//! element are concatenated in document order, then trimmed. Attribute reads
//! look at the first matching element only.

use dlsenc_core::Error;
use scraper::{ElementRef, Html, Selector};

/// A parsed product page.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse page text into a document tree.
    ///
    /// html5ever accepts any non-blank input, so only blank text is rejected.
    pub fn parse(text: &str) -> Result<Self, Error> {
        if text.trim().is_empty() {
            return Err(Error::ParseFailed("document is empty".into()));
        }
        Ok(Self { html: Html::parse_document(text) })
    }

    /// All elements matching `css`, in document order.
    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        let selector = selector(css);
        self.html.select(&selector).collect()
    }

    /// Trimmed text of every element matching `css`.
    pub fn text(&self, css: &str) -> String {
        let selector = selector(css);
        joined_text(self.html.select(&selector))
    }

    /// Trimmed text of the first element matching `css`.
    pub fn first_text(&self, css: &str) -> String {
        let selector = selector(css);
        self.html
            .select(&selector)
            .next()
            .map(element_text)
            .unwrap_or_default()
    }

    /// Attribute `name` of the first element matching `css`, or `default`.
    pub fn attr_or(&self, css: &str, name: &str, default: &str) -> String {
        let selector = selector(css);
        self.html
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr(name))
            .unwrap_or(default)
            .to_string()
    }

    /// Trimmed text of the elements matching `css`, ignoring anything under `exclude`.
    pub fn text_without(&self, css: &str, exclude: &str) -> String {
        let selector = selector(css);
        let exclude = self::selector(exclude);
        self.html
            .select(&selector)
            .map(|element| text_excluding(element, &exclude))
            .collect::<String>()
            .trim()
            .to_string()
    }
}

/// Compile a selector from a literal in this crate.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("invalid selector")
}

/// Trimmed text of a single element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the descendants of `element` matching `css`.
pub(crate) fn select_text(element: ElementRef<'_>, css: &str) -> String {
    let selector = selector(css);
    joined_text(element.select(&selector))
}

fn joined_text<'a>(elements: impl Iterator<Item = ElementRef<'a>>) -> String {
    elements
        .flat_map(|element| element.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Untrimmed text of `element` without the subtrees matched by `exclude`.
fn text_excluding(element: ElementRef<'_>, exclude: &Selector) -> String {
    let excluded: Vec<_> = element.select(exclude).map(|e| e.id()).collect();

    element
        .descendants()
        .filter(|node| {
            !excluded.contains(&node.id()) && !node.ancestors().any(|ancestor| excluded.contains(&ancestor.id()))
        })
        .filter_map(|node| node.value().as_text().map(|text| &**text))
        .collect()
}
