//! ISO 3166-1 code table parser
//!
//! Reads the first `table.wikitable` of the ISO 3166-1 article. Rows with
//! fewer than six `td` cells are headers or decoration and are ignored;
//! every other row must yield a name, a detail link and a code, otherwise
//! the page layout has changed and parsing fails.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{ContextualParser, ParseContext, compile_selector, full_text};
use crate::domain::{IsoCode, IsoRow, PipelineError, PipelineResult};

/// Parser for the ISO 3166-1 code table
pub struct IsoTableParser {
    table: Selector,
    row: Selector,
    cell: Selector,
    link: Selector,
    code: Selector,
}

impl IsoTableParser {
    /// Minimum number of `td` cells of a data row
    pub const MIN_CELLS: usize = 6;

    /// Zero-based index of the cell holding the alpha-2 `<code>`
    const CODE_CELL: usize = 5;

    pub fn new() -> PipelineResult<Self> {
        Ok(Self {
            table: compile_selector("table.wikitable")?,
            row: compile_selector("tr")?,
            cell: compile_selector("td")?,
            link: compile_selector("a[href]")?,
            code: compile_selector("code")?,
        })
    }

    fn parse_row(&self, sequence_id: u32, cells: &[ElementRef<'_>], context: &ParseContext) -> PipelineResult<IsoRow> {
        let first = &cells[0];
        let name = full_text(first);

        // Earlier links in the cell are flag icons and anchors; the article link comes last
        let href = first
            .select(&self.link)
            .last()
            .and_then(|a| a.value().attr("href"))
            .ok_or_else(|| {
                PipelineError::structural(
                    &context.source_name,
                    format!("row {sequence_id} ('{name}') has no hyperlink in its first cell"),
                )
            })?;

        let raw_code = cells[Self::CODE_CELL]
            .select(&self.code)
            .next()
            .map(|code| full_text(&code))
            .ok_or_else(|| {
                PipelineError::structural(
                    &context.source_name,
                    format!("row {sequence_id} ('{name}') has no <code> element in cell {}", Self::CODE_CELL + 1),
                )
            })?;

        let iso = IsoCode::parse(&raw_code).ok_or_else(|| {
            PipelineError::structural(
                &context.source_name,
                format!("row {sequence_id} ('{name}') has a malformed code {raw_code:?}"),
            )
        })?;

        let detail_url = context.resolve(href).ok_or_else(|| {
            PipelineError::structural(
                &context.source_name,
                format!("row {sequence_id} ('{name}') has an unresolvable link {href:?}"),
            )
        })?;

        Ok(IsoRow {
            sequence_id,
            name,
            iso,
            detail_url,
        })
    }
}

impl ContextualParser for IsoTableParser {
    type Output = Vec<IsoRow>;

    fn parse_with_context(&self, html: &Html, context: &ParseContext) -> PipelineResult<Self::Output> {
        let table = html
            .select(&self.table)
            .next()
            .ok_or_else(|| PipelineError::structural(&context.source_name, "no table.wikitable on the page"))?;

        let mut rows = Vec::new();
        for tr in table.select(&self.row) {
            let cells: Vec<ElementRef<'_>> = tr.select(&self.cell).collect();
            if cells.len() < Self::MIN_CELLS {
                continue;
            }

            let sequence_id = u32::try_from(rows.len() + 1)
                .map_err(|_| PipelineError::structural(&context.source_name, "too many rows"))?;
            rows.push(self.parse_row(sequence_id, &cells, context)?);
        }

        if rows.is_empty() {
            return Err(PipelineError::structural(
                &context.source_name,
                format!("no rows with at least {} cells", Self::MIN_CELLS),
            ));
        }

        debug!("Parsed {} ISO rows from {}", rows.len(), context.page_url);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn context() -> ParseContext {
        ParseContext::new("ISO 3166-1 table", Url::parse("https://ja.wikipedia.org/wiki/ISO_3166-1").unwrap())
    }

    fn row(name_cell: &str, code_cell: &str) -> String {
        format!("<tr><td>{name_cell}</td><td>392</td><td>JPN</td><td>x</td><td>y</td><td>{code_cell}</td></tr>")
    }

    fn page(rows: &[String]) -> Html {
        Html::parse_document(&format!(
            r#"<html><body><table class="wikitable"><tr><th>国・地域名</th><th>数字</th></tr>{}</table></body></html>"#,
            rows.join("")
        ))
    }

    #[test]
    fn test_parses_rows_using_last_link_and_code() {
        let html = page(&[
            row(
                r#"<a href="/wiki/File:Flag_of_Japan.svg"><img src="x.png"></a> <a href="/wiki/%E6%97%A5%E6%9C%AC">日本</a>"#,
                r#"<a href="/wiki/ISO_3166-2:JP"><span><code>JP</code></span></a>"#,
            ),
            row(r#"<a href="/wiki/Taiwan">台湾</a>"#, "<code>TW</code>"),
        ]);

        let rows = IsoTableParser::new().unwrap().parse_with_context(&html, &context()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sequence_id, 1);
        assert_eq!(rows[0].name, "日本");
        assert_eq!(rows[0].iso.as_str(), "JP");
        assert_eq!(rows[0].detail_url.as_str(), "https://ja.wikipedia.org/wiki/%E6%97%A5%E6%9C%AC");
        assert_eq!(rows[1].sequence_id, 2);
        assert_eq!(rows[1].iso.as_str(), "TW");
    }

    #[test]
    fn test_short_rows_are_ignored() {
        let html = page(&[
            "<tr><td>注記</td><td colspan=\"5\">-</td></tr>".to_string(),
            row(r#"<a href="/wiki/Japan">日本</a>"#, "<code>JP</code>"),
        ]);

        let rows = IsoTableParser::new().unwrap().parse_with_context(&html, &context()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sequence_id, 1);
    }

    #[test]
    fn test_missing_link_is_structural_error() {
        let html = page(&[
            row(r#"<a href="/wiki/Japan">日本</a>"#, "<code>JP</code>"),
            row("リンクなし", "<code>XX</code>"),
        ]);

        let err = IsoTableParser::new().unwrap().parse_with_context(&html, &context()).unwrap_err();
        assert!(matches!(err, PipelineError::StructuralParse { .. }), "{err}");
    }

    #[test]
    fn test_missing_code_is_structural_error() {
        let html = page(&[row(r#"<a href="/wiki/Japan">日本</a>"#, "JP")]);

        let err = IsoTableParser::new().unwrap().parse_with_context(&html, &context()).unwrap_err();
        assert!(matches!(err, PipelineError::StructuralParse { .. }));
    }

    #[test]
    fn test_malformed_code_is_structural_error() {
        let html = page(&[row(r#"<a href="/wiki/Japan">日本</a>"#, "<code>jpn</code>")]);

        let err = IsoTableParser::new().unwrap().parse_with_context(&html, &context()).unwrap_err();
        assert!(err.to_string().contains("malformed code"));
    }

    #[test]
    fn test_missing_table_is_structural_error() {
        let html = Html::parse_document("<html><body><p>moved</p></body></html>");

        let err = IsoTableParser::new().unwrap().parse_with_context(&html, &context()).unwrap_err();
        assert!(matches!(err, PipelineError::StructuralParse { .. }));
    }
}
