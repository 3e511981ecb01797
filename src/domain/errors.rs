//! Error taxonomy for the country pipeline
//!
//! Two channels, kept apart on purpose:
//! - [`PipelineError`]: fatal. The run unwinds and no dataset is written.
//! - [`SkipReason`]: recoverable, per country. The row is logged and dropped.

use std::path::PathBuf;

use thiserror::Error;

use super::country::{AssetKind, IsoCode};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Structural parse error in {source_name}: {reason}")]
    StructuralParse { source_name: String, reason: String },

    #[error("Name mismatch for {iso}: scraped '{scraped}' but canonical name is '{canonical}'")]
    NameMismatch {
        iso: IsoCode,
        scraped: String,
        canonical: String,
    },

    #[error("Unhandled thumbnail format for {iso} ({kind}): {url}")]
    ThumbnailRewrite {
        iso: IsoCode,
        kind: AssetKind,
        url: String,
    },

    #[error("No capitals record matches country '{name}'")]
    CapitalNotFound { name: String },

    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize dataset: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl PipelineError {
    pub fn structural(source_name: &str, reason: impl Into<String>) -> Self {
        Self::StructuralParse {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn fetch(url: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Why a country was left out of the dataset without aborting the run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("{iso} is not a UN member state")]
    NotMember { iso: IsoCode },

    #[error("no {missing} image found on the detail page for {iso}")]
    ImageUnresolved { iso: IsoCode, missing: &'static str },

    #[error("flag for {iso} is the 'no flag' placeholder")]
    PlaceholderFlag { iso: IsoCode },

    #[error("{kind} asset for {iso} is missing from the cache")]
    AssetMissing { iso: IsoCode, kind: AssetKind },
}

impl SkipReason {
    /// Short stable label used in the run report
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotMember { .. } => "not_member",
            Self::ImageUnresolved { .. } => "image_unresolved",
            Self::PlaceholderFlag { .. } => "placeholder_flag",
            Self::AssetMissing { .. } => "asset_missing",
        }
    }
}

/// A single failed asset download. Logged by the cache, never propagated.
#[derive(Error, Debug)]
#[error("Failed to download {kind} asset for {iso} from {url}: {reason}")]
pub struct AssetFetchError {
    pub iso: IsoCode,
    pub kind: AssetKind,
    pub url: String,
    pub reason: String,
}
