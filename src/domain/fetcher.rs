//! Page fetching service trait
//!
//! The pipeline only ever talks to the network through this trait, one
//! request at a time. A bounded-concurrency or caching fetcher can be
//! substituted without touching parsing, reconciliation or assembly.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a document and return its body as text
    async fn fetch_text(&self, url: &str) -> Result<String>;

    /// Fetch a binary resource (images)
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}
