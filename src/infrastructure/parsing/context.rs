//! Parsing context for HTML extraction

use url::Url;

/// Context information for parsing operations
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Human-readable source label used in error messages ("ISO 3166-1 table", …)
    pub source_name: String,

    /// URL the document was fetched from, for resolving relative links
    pub page_url: Url,
}

impl ParseContext {
    pub fn new(source_name: &str, page_url: Url) -> Self {
        Self {
            source_name: source_name.to_string(),
            page_url,
        }
    }

    /// Resolve an `href` found in the document against the page URL
    pub fn resolve(&self, href: &str) -> Option<Url> {
        self.page_url.join(href).ok()
    }
}
