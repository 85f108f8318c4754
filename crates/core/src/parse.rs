//! HTML parsing for downloaded pages.
//!
//! Only the document title is needed to name the files of a delivery, so
//! [`Document`] exposes little beyond that.
//!
//! # Example
//!
//! ```rust
//! use kindler_core::parse::Document;
//!
//! let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
//! let doc = Document::parse(html);
//! assert_eq!(doc.title(), Some("Test".to_string()));
//! ```

use scraper::{Html, Selector};

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient and never fails; malformed markup produces a best
    /// effort tree the same way a browser would.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Gets the title of the document.
    ///
    /// Returns the text of the first `<title>` element, trimmed, or `None`
    /// when there is no title or it contains only whitespace.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
    }
}
