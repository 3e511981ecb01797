//! Capitals table parser
//!
//! The capitals article has several tables; the one we want is the first
//! `<table>` after the section anchor (`id="一覧"`). Rows are returned keyed
//! by the header labels, with footnote markers removed from every cell.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::{ContextualParser, ParseContext, compile_selector, stripped_text};
use crate::domain::{PipelineError, PipelineResult};

/// `[注釈 1]`, `[注釈2]`, `[1]`, `[12]`, …
static FOOTNOTE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(?:注釈\s*)?\d+\]").unwrap());

/// Remove footnote markers and surrounding whitespace from a cell
pub fn clean_cell_text(text: &str) -> String {
    FOOTNOTE_MARKER.replace_all(text, "").trim().to_string()
}

/// One data row, cells keyed by header label in column order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    cells: Vec<(String, String)>,
}

impl TableRow {
    pub fn from_cells(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    /// Cell under a header label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(header, _)| header == label)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CapitalsTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// Parser for the capitals list
pub struct CapitalsTableParser {
    anchor_id: String,
    row: Selector,
    cell: Selector,
}

impl CapitalsTableParser {
    pub fn new(anchor_id: &str) -> PipelineResult<Self> {
        Ok(Self {
            anchor_id: anchor_id.to_string(),
            row: compile_selector("tr")?,
            cell: compile_selector("th, td")?,
        })
    }

    /// First `<table>` following the anchor element in document order
    fn find_table<'a>(&self, html: &'a Html) -> Option<ElementRef<'a>> {
        let mut seen_anchor = false;
        for element in html.root_element().descendants().filter_map(ElementRef::wrap) {
            if !seen_anchor {
                seen_anchor = element.value().id() == Some(self.anchor_id.as_str());
                continue;
            }
            if element.value().name() == "table" {
                return Some(element);
            }
        }
        None
    }
}

impl ContextualParser for CapitalsTableParser {
    type Output = CapitalsTable;

    fn parse_with_context(&self, html: &Html, context: &ParseContext) -> PipelineResult<Self::Output> {
        let table = self.find_table(html).ok_or_else(|| {
            PipelineError::structural(
                &context.source_name,
                format!("no table after element id='{}'", self.anchor_id),
            )
        })?;

        let mut trs = table.select(&self.row);
        let header_row = trs
            .next()
            .ok_or_else(|| PipelineError::structural(&context.source_name, "capitals table has no rows"))?;
        let headers: Vec<String> = header_row.select(&self.cell).map(|c| stripped_text(&c)).collect();

        let mut rows = Vec::new();
        for tr in trs {
            let cells: Vec<String> = tr.select(&self.cell).map(|c| stripped_text(&c)).collect();
            if cells.len() != headers.len() {
                warn!("⚠️ Cell count does not match header count, skipping row: {:?}", cells);
                continue;
            }

            let keyed = headers
                .iter()
                .zip(cells.iter())
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, cell)| (header.clone(), clean_cell_text(cell)))
                .collect();
            rows.push(TableRow::from_cells(keyed));
        }

        debug!("Parsed {} capitals rows with headers {:?}", rows.len(), headers);
        Ok(CapitalsTable { headers, rows })
    }
}
