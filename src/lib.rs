//! Country Atlas - UN member-state reference dataset builder
//!
//! Scrapes the ISO 3166-1 code table and the capitals list from Japanese
//! Wikipedia, resolves each country's flag and location-map images from
//! its detail page, caches them locally and emits a validated JSON list.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{CountryPipeline, PipelineReport, PipelineRun};
pub use domain::{CountryEntry, PipelineError, PipelineResult};
pub use infrastructure::{AppConfig, HttpClient};
