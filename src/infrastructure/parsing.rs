//! HTML parsing for the three Wikipedia sources
//!
//! Trait-based parsers over `scraper::Html`: the ISO 3166-1 code table,
//! the capitals table, and the image candidates of a country detail page.
//! Every parser compiles its selectors once at construction.

pub mod capitals_parser;
pub mod context;
pub mod image_classifier;
pub mod iso_table_parser;

pub use capitals_parser::{CapitalsTable, CapitalsTableParser, TableRow};
pub use context::ParseContext;
pub use image_classifier::{ImageCandidate, ImageCategory, ImageClassifier, ImageScan};
pub use iso_table_parser::IsoTableParser;

use scraper::{ElementRef, Html, Selector};

use crate::domain::{PipelineError, PipelineResult};

/// Parser over a whole document with contextual information
pub trait ContextualParser {
    type Output;

    /// Parse HTML with contextual information
    fn parse_with_context(&self, html: &Html, context: &ParseContext) -> PipelineResult<Self::Output>;
}

/// Compile a selector string, reporting a configuration error if it is invalid
pub(crate) fn compile_selector(selector: &str) -> PipelineResult<Selector> {
    Selector::parse(selector).map_err(|e| PipelineError::Config {
        message: format!("Invalid CSS selector '{selector}': {e}"),
    })
}

/// Text of an element with every text node trimmed and concatenated
pub(crate) fn stripped_text(element: &ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Text of an element concatenated as-is, then trimmed at both ends
pub(crate) fn full_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
