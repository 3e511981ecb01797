//! Domain module - country records, membership table and error taxonomy
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod country;
pub mod errors;
pub mod fetcher;
pub mod membership;
pub mod thumbnail;

pub use country::{AssetKind, CapitalRecord, CountryEntry, ImagePair, IsoCode, IsoRow};
pub use errors::{AssetFetchError, PipelineError, PipelineResult, SkipReason};
pub use fetcher::PageFetcher;
pub use membership::{CanonicalMembership, UN_MEMBER_COUNT, UN_MEMBERS};
pub use thumbnail::rewrite_thumbnail;
