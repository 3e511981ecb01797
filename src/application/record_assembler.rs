//! Country record assembly and validation
//!
//! Admission decides whether an ISO row belongs in the dataset at all;
//! assembly merges the row with its cached assets and capitals record.
//! Data-integrity violations (wrong name, missing capital) abort the run.

use tracing::debug;

use super::name_reconciler::CapitalsIndex;
use crate::domain::{
    AssetKind, CanonicalMembership, CountryEntry, IsoCode, IsoRow, PipelineError, PipelineResult, SkipReason,
};
use crate::infrastructure::CachedAssets;

/// Monaco is a city-state; the capitals table has no separate row for it
const CAPITAL_EXEMPT: &[&str] = &["MC"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Member,
    Skip(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Emit(Box<CountryEntry>),
    Skip(SkipReason),
}

pub struct RecordAssembler<'a> {
    membership: &'static CanonicalMembership,
    capitals: &'a CapitalsIndex,
    public_url_prefix: String,
    article_path_prefix: String,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(capitals: &'a CapitalsIndex, public_url_prefix: &str, article_path_prefix: &str) -> Self {
        Self {
            membership: CanonicalMembership::global(),
            capitals,
            public_url_prefix: public_url_prefix.trim_end_matches('/').to_string(),
            article_path_prefix: article_path_prefix.to_string(),
        }
    }

    /// Membership filter and name check
    pub fn admit(&self, row: &IsoRow) -> PipelineResult<Admission> {
        let Some(canonical) = self.membership.canonical_name(&row.iso) else {
            return Ok(Admission::Skip(SkipReason::NotMember { iso: row.iso.clone() }));
        };

        if row.name != canonical {
            return Err(PipelineError::NameMismatch {
                iso: row.iso.clone(),
                scraped: row.name.clone(),
                canonical: canonical.to_string(),
            });
        }

        Ok(Admission::Member)
    }

    /// Build the entry for an admitted row
    pub fn assemble(&self, row: &IsoRow, assets: &CachedAssets) -> PipelineResult<RowOutcome> {
        for kind in [AssetKind::Flag, AssetKind::Location] {
            if !assets.path_for(kind).is_some_and(std::path::Path::is_file) {
                return Ok(RowOutcome::Skip(SkipReason::AssetMissing {
                    iso: row.iso.clone(),
                    kind,
                }));
            }
        }

        let (capital, note) = match self.capitals.get(&row.name) {
            Some(record) => (record.capital.clone(), record.note.clone().unwrap_or_default()),
            None if CAPITAL_EXEMPT.contains(&row.iso.as_str()) => (String::new(), String::new()),
            None => return Err(PipelineError::CapitalNotFound { name: row.name.clone() }),
        };

        let entry = CountryEntry {
            id: row.sequence_id,
            localized_name: row.name.clone(),
            iso: row.iso.clone(),
            source_path: self.source_path(row),
            flag_asset_path: self.public_path(&row.iso, AssetKind::Flag),
            location_asset_path: self.public_path(&row.iso, AssetKind::Location),
            emoji: row.iso.flag_emoji(),
            capital,
            note,
        };
        debug!("Assembled {} ({}) id={}", entry.localized_name, entry.iso, entry.id);
        Ok(RowOutcome::Emit(Box::new(entry)))
    }

    /// Detail URL path after the article prefix, still percent-encoded
    fn source_path(&self, row: &IsoRow) -> String {
        let path = row.detail_url.path();
        path.strip_prefix(self.article_path_prefix.as_str()).unwrap_or(path).to_string()
    }

    fn public_path(&self, iso: &IsoCode, kind: AssetKind) -> String {
        format!("{}/{}/{}.png", self.public_url_prefix, kind.dir_name(), iso)
    }
}
