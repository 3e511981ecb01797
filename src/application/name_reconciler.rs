//! Capitals-table name reconciliation
//!
//! The capitals page spells some countries differently from the ISO table:
//! a reading prefix glued in front of the kanji name (`ニホン日本`), or a
//! short form (`ロシア`). Rows are normalised here and indexed by the
//! canonical name so the assembler can look them up by `IsoRow::name`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::domain::{CapitalRecord, PipelineError, PipelineResult};
use crate::infrastructure::parsing::{CapitalsTable, TableRow};

/// Capitals table column labels
pub mod columns {
    pub const COUNTRY: &str = "国名";
    pub const CAPITAL: &str = "首都名";
    pub const NOTE: &str = "備考";
}

/// Notes are kept only when they name the largest city ("最大都市は…")
const INFORMATIVE_NOTE_MARKER: &str = "最大都市は";

/// Cross-reference appended to the US note ("see also: list of US capitals")
const NOTE_CROSS_REFERENCE: &str = "「アメリカ合衆国の首都の一覧」も参照";

/// Scraped capitals-page variant → name used by the ISO table
static NAME_FIXES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ミナミアフリカ南アフリカ共和国", "南アフリカ"),
        ("ミナミスタン南スーダン", "南スーダン"),
        ("チュウカ中華人民共和国", "中華人民共和国"),
        ("セキドウ赤道ギニア", "赤道ギニア"),
        ("チヨウセン朝鮮民主主義人民共和国", "朝鮮民主主義人民共和国"),
        ("チュウオウ中央アフリカ共和国", "中央アフリカ共和国"),
        ("ラオス", "ラオス人民民主共和国"),
        ("ベネズエラ", "ベネズエラ・ボリバル共和国"),
        ("モルドバ", "モルドバ共和国"),
        ("ボリビア", "ボリビア多民族国"),
        ("ダイカンミンコク大韓民国", "大韓民国"),
        ("イラン", "イラン・イスラム共和国"),
        ("エスワティニ王国", "エスワティニ"),
        ("シリア", "シリア・アラブ共和国"),
        ("ニホン日本", "日本"),
        ("ヒガシ東ティモール", "東ティモール"),
        ("ブルネイ", "ブルネイ・ダルサラーム"),
        ("ロシア", "ロシア連邦"),
    ])
});

/// Canonical country name for a capitals-table name; unknown names pass through
pub fn reconcile_name(raw: &str) -> String {
    NAME_FIXES.get(raw).map_or_else(|| raw.to_string(), |fixed| (*fixed).to_string())
}

/// Keep only informative notes, without the cross-reference phrase
pub fn filter_note(raw: Option<&str>) -> Option<String> {
    let note = raw?;
    if !note.contains(INFORMATIVE_NOTE_MARKER) {
        return None;
    }
    Some(note.replace(NOTE_CROSS_REFERENCE, "").trim().to_string()).filter(|n| !n.is_empty())
}

/// Convert one parsed capitals row
pub fn to_capital_record(row: &TableRow, source_name: &str) -> PipelineResult<CapitalRecord> {
    let raw_name = row.get(columns::COUNTRY).ok_or_else(|| {
        PipelineError::structural(source_name, format!("capitals row without a '{}' cell", columns::COUNTRY))
    })?;

    Ok(CapitalRecord {
        country_name: reconcile_name(raw_name),
        capital: row.get(columns::CAPITAL).unwrap_or_default().to_string(),
        note: filter_note(row.get(columns::NOTE)),
    })
}

/// Capitals records keyed by canonical country name
#[derive(Debug, Clone, Default)]
pub struct CapitalsIndex {
    records: HashMap<String, CapitalRecord>,
}

impl CapitalsIndex {
    /// Build the index; the first row for a name wins
    pub fn from_table(table: &CapitalsTable, source_name: &str) -> PipelineResult<Self> {
        for required in [columns::COUNTRY, columns::CAPITAL] {
            if !table.headers.iter().any(|h| h == required) {
                return Err(PipelineError::structural(
                    source_name,
                    format!("capitals table has no '{required}' column (headers: {:?})", table.headers),
                ));
            }
        }

        let mut records = HashMap::with_capacity(table.rows.len());
        for row in &table.rows {
            let record = to_capital_record(row, source_name)?;
            if records.contains_key(&record.country_name) {
                warn!("⚠️ Duplicate capitals row for '{}', keeping the first", record.country_name);
                continue;
            }
            records.insert(record.country_name.clone(), record);
        }

        debug!("Indexed {} capitals records", records.len());
        Ok(Self { records })
    }

    pub fn get(&self, country_name: &str) -> Option<&CapitalRecord> {
        self.records.get(country_name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> TableRow {
        TableRow::from_cells(cells.iter().map(|(h, v)| ((*h).to_string(), (*v).to_string())).collect())
    }

    #[test]
    fn test_name_fixes() {
        assert_eq!(NAME_FIXES.len(), 18);
        assert_eq!(reconcile_name("ニホン日本"), "日本");
        assert_eq!(reconcile_name("ロシア"), "ロシア連邦");
        assert_eq!(reconcile_name("ダイカンミンコク大韓民国"), "大韓民国");
        assert_eq!(reconcile_name("フランス"), "フランス");
    }

    #[test]
    fn test_note_filter() {
        assert_eq!(filter_note(None), None);
        assert_eq!(filter_note(Some("")), None);
        assert_eq!(filter_note(Some("旧首都はリオデジャネイロ")), None);
        assert_eq!(
            filter_note(Some("最大都市はニューヨーク。「アメリカ合衆国の首都の一覧」も参照 ")),
            Some("最大都市はニューヨーク。".to_string())
        );
    }

    #[test]
    fn test_to_capital_record() {
        let record = to_capital_record(
            &row(&[("国名", "ニホン日本"), ("首都名", "東京"), ("備考", "事実上の首都")]),
            "capitals",
        )
        .unwrap();

        assert_eq!(record.country_name, "日本");
        assert_eq!(record.capital, "東京");
        assert_eq!(record.note, None);
    }

    #[test]
    fn test_index_keeps_first_record() {
        let table = CapitalsTable {
            headers: vec!["国名".to_string(), "首都名".to_string()],
            rows: vec![
                row(&[("国名", "ボリビア"), ("首都名", "スクレ")]),
                row(&[("国名", "ボリビア多民族国"), ("首都名", "ラパス")]),
            ],
        };

        let index = CapitalsIndex::from_table(&table, "capitals").unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("ボリビア多民族国").map(|r| r.capital.as_str()), Some("スクレ"));
    }

    #[test]
    fn test_missing_country_column_is_structural() {
        let table = CapitalsTable {
            headers: vec!["国".to_string(), "首都名".to_string()],
            rows: vec![],
        };

        let err = CapitalsIndex::from_table(&table, "capitals").unwrap_err();
        assert!(matches!(err, PipelineError::StructuralParse { .. }));
    }
}
