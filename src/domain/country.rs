//! Country records flowing through the pipeline
//!
//! `IsoRow` and `CapitalRecord` are transient (one per scraped table row),
//! `CountryEntry` is the only persisted shape.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// First codepoint of the Unicode "Regional Indicator Symbol" block (🇦)
const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/// ISO 3166-1 alpha-2 code, always two ASCII uppercase letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IsoCode(String);

impl IsoCode {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.len() == 2 && raw.bytes().all(|b| b.is_ascii_uppercase()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Flag emoji made of the two regional indicator symbols for this code
    pub fn flag_emoji(&self) -> String {
        self.0
            .bytes()
            .filter_map(|b| char::from_u32(REGIONAL_INDICATOR_A + u32::from(b - b'A')))
            .collect()
    }
}

impl fmt::Display for IsoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for IsoCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("not an ISO 3166-1 alpha-2 code: {value:?}"))
    }
}

impl From<IsoCode> for String {
    fn from(code: IsoCode) -> Self {
        code.0
    }
}

/// One qualifying row of the ISO 3166-1 table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoRow {
    /// 1-based position among qualifying rows, before any filtering
    pub sequence_id: u32,
    pub name: String,
    pub iso: IsoCode,
    pub detail_url: Url,
}

/// One row of the capitals table after name reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapitalRecord {
    pub country_name: String,
    pub capital: String,
    pub note: Option<String>,
}

/// Which of the two per-country images an asset is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Flag,
    Location,
}

impl AssetKind {
    /// Sub-directory name used both in the cache and in public URLs
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Flag => "flags",
            Self::Location => "locations",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => f.write_str("flag"),
            Self::Location => f.write_str("location"),
        }
    }
}

/// Resolved image URLs for one country, already rewritten to the canonical size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub flag_url: String,
    pub location_url: String,
}

impl ImagePair {
    pub fn url_for(&self, kind: AssetKind) -> &str {
        match kind {
            AssetKind::Flag => &self.flag_url,
            AssetKind::Location => &self.location_url,
        }
    }
}

/// Final dataset entry, serialized with the keys the front-end reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub id: u32,
    #[serde(rename = "ja")]
    pub localized_name: String,
    pub iso: IsoCode,
    #[serde(rename = "url")]
    pub source_path: String,
    #[serde(rename = "flag")]
    pub flag_asset_path: String,
    #[serde(rename = "pos")]
    pub location_asset_path: String,
    pub emoji: String,
    pub capital: String,
    pub note: String,
}
