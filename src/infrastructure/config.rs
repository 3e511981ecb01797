//! Configuration infrastructure
//!
//! Contains configuration loading for the country pipeline.
//!
//! Sources are layered with the `config` crate:
//! 1. Built-in defaults (see [`defaults`])
//! 2. Optional config file (`--config`, else `<config dir>/country-atlas/config.json`)
//! 3. `COUNTRY_ATLAS_ASSET_DIR`, which only overrides the asset cache directory

#![allow(clippy::uninlined_format_args)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Environment variable overriding `cache.asset_dir`
pub const ASSET_DIR_ENV: &str = "COUNTRY_ATLAS_ASSET_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    Load {
        #[from]
        source: config::ConfigError,
    },

    #[error("Failed to encode default config: {0}")]
    Defaults(#[from] serde_json::Error),

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub sources: SourceConfig,
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Where the two tables live and how detail links are shaped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// ISO 3166-1 page carrying the code table
    pub iso_table_url: String,

    /// Capitals list page
    pub capitals_url: String,

    /// `id` of the element after which the capitals table starts
    pub capitals_anchor_id: String,

    /// Path prefix stripped from detail URLs for the `url` field
    pub article_path_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// User agent string
    pub user_agent: String,

    /// Whether to follow redirects
    pub follow_redirects: bool,

    /// Delay between per-country network operations in milliseconds
    pub request_delay_ms: u64,
}

impl HttpConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

/// Local image cache layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Root of the asset tree; flags and location maps live in sub-directories
    pub asset_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Dataset JSON file
    pub dataset_path: PathBuf,

    /// Prefix the front-end serves the asset tree under
    pub public_url_prefix: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted file logs
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for the log file
    pub log_dir: PathBuf,

    /// Log file name inside `log_dir`
    pub file_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: SourceConfig::default(),
            http: HttpConfig::default(),
            cache: CacheConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            iso_table_url: wikipedia::ISO_3166_1_URL.to_string(),
            capitals_url: wikipedia::CAPITALS_URL.to_string(),
            capitals_anchor_id: wikipedia::CAPITALS_ANCHOR_ID.to_string(),
            article_path_prefix: wikipedia::ARTICLE_PATH_PREFIX.to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            user_agent: defaults::USER_AGENT.to_string(),
            follow_redirects: true,
            request_delay_ms: defaults::REQUEST_DELAY_MS,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from(defaults::ASSET_DIR),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(defaults::DATASET_PATH),
            public_url_prefix: defaults::PUBLIC_URL_PREFIX.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: PathBuf::from(defaults::LOG_DIR),
            file_name: defaults::LOG_FILE_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional file, and the asset-dir override
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults_json = serde_json::to_string(&Self::default())?;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(&defaults_json, config::FileFormat::Json));

        builder = match path {
            Some(path) => {
                info!("Loading configuration from: {:?}", path);
                builder.add_source(config::File::from(path))
            }
            None => match Self::default_config_path() {
                Some(default_path) => builder.add_source(config::File::from(default_path).required(false)),
                None => builder,
            },
        };

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_asset_dir_override(std::env::var(ASSET_DIR_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// `<user config dir>/country-atlas/config.json`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("country-atlas").join("config.json"))
    }

    fn apply_asset_dir_override(&mut self, value: Option<String>) {
        if let Some(dir) = value.filter(|v| !v.trim().is_empty()) {
            info!("Asset directory overridden by {}: {}", ASSET_DIR_ENV, dir);
            self.cache.asset_dir = PathBuf::from(dir);
        }
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                message: "http.timeout_seconds must be greater than 0".to_string(),
            });
        }

        for (name, value) in [
            ("sources.iso_table_url", &self.sources.iso_table_url),
            ("sources.capitals_url", &self.sources.capitals_url),
        ] {
            if url::Url::parse(value).is_err() {
                return Err(ConfigError::Validation {
                    message: format!("{} is not a valid absolute URL: {:?}", name, value),
                });
            }
        }

        if self.cache.asset_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation {
                message: "cache.asset_dir must not be empty".to_string(),
            });
        }

        if !self.logging.console_output && !self.logging.file_output {
            return Err(ConfigError::Validation {
                message: "at least one of logging.console_output / logging.file_output must be enabled".to_string(),
            });
        }

        Ok(())
    }
}

/// Japanese Wikipedia source pages
pub mod wikipedia {
    /// Base URL for Japanese Wikipedia
    pub const BASE_URL: &str = "https://ja.wikipedia.org";

    /// ISO 3166-1 article, whose first `wikitable` lists every code
    pub const ISO_3166_1_URL: &str = "https://ja.wikipedia.org/wiki/ISO_3166-1";

    /// "首都の一覧" (list of capitals)
    pub const CAPITALS_URL: &str = "https://ja.wikipedia.org/wiki/%E9%A6%96%E9%83%BD%E3%81%AE%E4%B8%80%E8%A6%A7";

    /// Section heading id preceding the capitals table
    pub const CAPITALS_ANCHOR_ID: &str = "一覧";

    /// Article path prefix
    pub const ARTICLE_PATH_PREFIX: &str = "/wiki/";
}

/// Default pipeline configuration values
pub mod defaults {
    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 100;

    /// Default delay between per-country network operations in milliseconds
    pub const REQUEST_DELAY_MS: u64 = 10;

    /// Desktop browser user agent; Wikimedia rejects some bare client agents
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";

    /// Default asset cache root
    pub const ASSET_DIR: &str = "public/geography";

    /// Default dataset location
    pub const DATASET_PATH: &str = "src/data/geography/wiki.json";

    /// Public URL prefix matching `ASSET_DIR` once deployed
    pub const PUBLIC_URL_PREFIX: &str = "/memorize-app/geography";

    // Log configuration defaults
    /// Default log level
    pub const LOG_LEVEL: &str = "info";

    /// Default JSON format setting
    pub const LOG_JSON_FORMAT: bool = false;

    /// Default console output setting
    pub const LOG_CONSOLE_OUTPUT: bool = true;

    /// Default file output setting
    pub const LOG_FILE_OUTPUT: bool = false;

    /// Default log directory
    pub const LOG_DIR: &str = "logs";

    /// Default log file name
    pub const LOG_FILE_NAME: &str = "country-atlas.log";
}
