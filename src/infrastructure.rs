//! Infrastructure layer: HTTP, HTML parsing, asset cache, output and ambient setup
//!
//! This module provides the network client, the three table/page parsers,
//! the on-disk image cache, the dataset writer, configuration and logging.

pub mod asset_cache; // flags/ and locations/ image cache
pub mod config; // Configuration loading and defaults
pub mod dataset_writer;
pub mod logging; // Logging infrastructure
pub mod parsing; // Table and image parsers
pub mod simple_http_client;

// Re-export commonly used items
pub use asset_cache::{AssetCache, CachedAssets};
pub use config::{AppConfig, ConfigError};
pub use dataset_writer::write_dataset;
pub use logging::init_logging_with_config;
pub use simple_http_client::{HttpClient, HttpClientConfig};
