//! Read-only sample document used for selector feedback.

use scraper::{ElementRef, Html, Selector};

use crate::errors::SelectorError;

/// A parsed sample page that selectors are tested against.
///
/// The document is owned by the caller and never mutated.
#[derive(Debug, Clone)]
pub struct SampleDocument {
    html: Html,
}

impl SampleDocument {
    /// Parses a full HTML document.
    #[must_use]
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Every element matching `css`, in document order.
    pub fn select(&self, css: &str) -> Result<Vec<ElementRef<'_>>, SelectorError> {
        let selector = parse_selector(css)?;
        Ok(self.html.select(&selector).collect())
    }

    /// Number of elements matching `css`.
    pub fn count(&self, css: &str) -> Result<usize, SelectorError> {
        let selector = parse_selector(css)?;
        Ok(self.html.select(&selector).count())
    }
}

/// Parses a CSS selector with the document engine.
pub fn parse_selector(css: &str) -> Result<Selector, SelectorError> {
    Selector::parse(css).map_err(|e| SelectorError::new(css, e.to_string()))
}

/// Text content of an element with whitespace runs collapsed.
#[must_use]
pub fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <ul class="menu">
                <li>  One  </li>
                <li>Two <b>bold</b></li>
            </ul>
        </body></html>
    "#;

    #[test]
    fn test_select_and_count() {
        let doc = SampleDocument::parse(PAGE);
        assert_eq!(doc.count("ul.menu li").unwrap(), 2);
        let items = doc.select("li").unwrap();
        assert_eq!(element_text(&items[0]), "One");
        assert_eq!(element_text(&items[1]), "Two bold");
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        let doc = SampleDocument::parse(PAGE);
        let err = doc.count("li[").unwrap_err();
        assert_eq!(err.selector, "li[");
    }

    #[test]
    fn test_sentinel_matches_nothing() {
        let doc = SampleDocument::parse(PAGE);
        assert_eq!(doc.count(crate::selector::INVALID_SELECTOR).unwrap(), 0);
    }
}
