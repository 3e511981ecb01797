//! Country dataset pipeline
//!
//! Fetches the capitals and ISO 3166-1 tables, then walks the ISO rows in
//! table order: admission, image resolution, asset caching, assembly.
//! Strictly one request at a time. Any fatal error aborts before output.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use scraper::Html;
use tracing::{info, warn};
use url::Url;

use super::image_resolver::{ImageResolution, ImageResolver};
use super::name_reconciler::CapitalsIndex;
use super::record_assembler::{Admission, RecordAssembler, RowOutcome};
use crate::domain::{CountryEntry, IsoRow, PageFetcher, PipelineError, PipelineResult, SkipReason};
use crate::infrastructure::config::{AppConfig, SourceConfig};
use crate::infrastructure::parsing::{CapitalsTableParser, ContextualParser, IsoTableParser, ParseContext};
use crate::infrastructure::{AssetCache, CachedAssets, write_dataset};

const ISO_SOURCE: &str = "ISO 3166-1 table";
const CAPITALS_SOURCE: &str = "capitals table";

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub rows_seen: usize,
    pub emitted: usize,
    /// Skipped rows by [`SkipReason::label`]
    pub skipped: BTreeMap<&'static str, usize>,
    pub asset_downloads: usize,
    /// Countries served entirely from the asset cache
    pub cache_hits: usize,
}

impl PipelineReport {
    fn record_skip(&mut self, reason: &SkipReason) {
        *self.skipped.entry(reason.label()).or_default() += 1;
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn log_summary(&self) {
        info!("📊 Pipeline summary");
        info!("  rows seen:       {}", self.rows_seen);
        info!("  emitted:         {}", self.emitted);
        info!("  skipped:         {} {:?}", self.skipped_total(), self.skipped);
        info!("  asset downloads: {}", self.asset_downloads);
        info!("  cache hits:      {}", self.cache_hits);
    }
}

#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub entries: Vec<CountryEntry>,
    pub report: PipelineReport,
}

pub struct CountryPipeline<F: PageFetcher> {
    fetcher: F,
    sources: SourceConfig,
    cache: AssetCache,
    public_url_prefix: String,
    request_delay: Duration,
}

impl<F: PageFetcher> CountryPipeline<F> {
    pub fn new(fetcher: F, config: &AppConfig) -> Self {
        Self {
            fetcher,
            sources: config.sources.clone(),
            cache: AssetCache::new(config.cache.asset_dir.clone()),
            public_url_prefix: config.output.public_url_prefix.clone(),
            request_delay: config.http.request_delay(),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    async fn fetch_document(&self, source_name: &str, url: &str) -> PipelineResult<(Html, ParseContext)> {
        let page_url =
            Url::parse(url).map_err(|e| PipelineError::structural(source_name, format!("bad source URL {url}: {e}")))?;
        let body = self
            .fetcher
            .fetch_text(url)
            .await
            .map_err(|e| PipelineError::fetch(url, e))?;
        Ok((Html::parse_document(&body), ParseContext::new(source_name, page_url)))
    }

    async fn load_capitals(&self) -> PipelineResult<CapitalsIndex> {
        let (html, context) = self.fetch_document(CAPITALS_SOURCE, &self.sources.capitals_url).await?;
        let table = CapitalsTableParser::new(&self.sources.capitals_anchor_id)?.parse_with_context(&html, &context)?;
        let index = CapitalsIndex::from_table(&table, CAPITALS_SOURCE)?;
        if index.is_empty() {
            return Err(PipelineError::structural(CAPITALS_SOURCE, "capitals table has no data rows"));
        }
        Ok(index)
    }

    async fn load_iso_rows(&self) -> PipelineResult<Vec<IsoRow>> {
        let (html, context) = self.fetch_document(ISO_SOURCE, &self.sources.iso_table_url).await?;
        IsoTableParser::new()?.parse_with_context(&html, &context)
    }

    /// Cached assets for a member row, fetching page and images when needed
    ///
    /// Returns `Ok(Err(reason))` when the images cannot be resolved, and
    /// whether any network I/O happened.
    async fn acquire_assets(
        &self,
        resolver: &ImageResolver<'_>,
        row: &IsoRow,
        report: &mut PipelineReport,
    ) -> PipelineResult<(Result<CachedAssets, SkipReason>, bool)> {
        if self.cache.is_complete(&row.iso) {
            report.cache_hits += 1;
            return Ok((Ok(self.cache.cached_assets(&row.iso)), false));
        }

        match resolver.resolve(&row.iso, &row.detail_url).await? {
            ImageResolution::Unresolved(reason) => Ok((Err(reason), true)),
            ImageResolution::Resolved(images) => {
                let assets = self.cache.ensure_pair(&self.fetcher, &row.iso, &images).await;
                report.asset_downloads += assets.downloads;
                Ok((Ok(assets), true))
            }
        }
    }

    /// Run the whole pipeline and return the entries in ISO-table order
    pub async fn run(&self) -> PipelineResult<PipelineRun> {
        info!("🚀 Starting country pipeline");
        let capitals = self.load_capitals().await?;
        info!("✅ Loaded {} capitals records", capitals.len());

        let rows = self.load_iso_rows().await?;
        info!("✅ Loaded {} ISO 3166-1 rows", rows.len());

        let assembler = RecordAssembler::new(&capitals, &self.public_url_prefix, &self.sources.article_path_prefix);
        let resolver = ImageResolver::new(&self.fetcher)?;
        let mut report = PipelineReport::default();
        let mut entries = Vec::new();

        for row in &rows {
            report.rows_seen += 1;

            if let Admission::Skip(reason) = assembler.admit(row)? {
                info!("⏭️ {} ({}): {}", row.name, row.iso, reason);
                report.record_skip(&reason);
                continue;
            }

            let (assets, networked) = self.acquire_assets(&resolver, row, &mut report).await?;
            let outcome = match assets {
                Ok(assets) => assembler.assemble(row, &assets)?,
                Err(reason) => RowOutcome::Skip(reason),
            };

            match outcome {
                RowOutcome::Emit(entry) => {
                    info!("🗺️ [{}] {} {} ({})", entry.id, entry.emoji, entry.localized_name, entry.iso);
                    report.emitted += 1;
                    entries.push(*entry);
                }
                RowOutcome::Skip(reason) => {
                    warn!("⏭️ {} ({}): {}", row.name, row.iso, reason);
                    report.record_skip(&reason);
                }
            }

            if networked && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
        }

        report.log_summary();
        Ok(PipelineRun { entries, report })
    }

    /// Run and write the dataset; nothing is written when the run fails
    pub async fn run_to_file(&self, path: &Path) -> PipelineResult<PipelineReport> {
        let run = self.run().await?;
        write_dataset(path, &run.entries).await?;
        Ok(run.report)
    }
}
