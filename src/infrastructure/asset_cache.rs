//! Local flag / location-map image cache
//!
//! Layout: `<root>/flags/<ISO>.png` and `<root>/locations/<ISO>.png`.
//! A file at its final path is always complete: downloads go to a `.part`
//! sibling first and are renamed into place.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use url::Url;

use crate::domain::{AssetFetchError, AssetKind, ImagePair, IsoCode, PageFetcher};

/// Local paths of a country's assets after a cache pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedAssets {
    pub flag: Option<PathBuf>,
    pub location: Option<PathBuf>,
    /// Files actually downloaded during this pass
    pub downloads: usize,
}

impl CachedAssets {
    pub fn path_for(&self, kind: AssetKind) -> Option<&Path> {
        match kind {
            AssetKind::Flag => self.flag.as_deref(),
            AssetKind::Location => self.location.as_deref(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssetCache {
    root: PathBuf,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, iso: &IsoCode, kind: AssetKind) -> PathBuf {
        self.root.join(kind.dir_name()).join(format!("{iso}.png"))
    }

    /// Both images for the code are already on disk
    pub fn is_complete(&self, iso: &IsoCode) -> bool {
        [AssetKind::Flag, AssetKind::Location]
            .into_iter()
            .all(|kind| self.path_for(iso, kind).is_file())
    }

    /// Current cache state for the code without any network access
    pub fn cached_assets(&self, iso: &IsoCode) -> CachedAssets {
        let existing = |kind| Some(self.path_for(iso, kind)).filter(|path| path.is_file());
        CachedAssets {
            flag: existing(AssetKind::Flag),
            location: existing(AssetKind::Location),
            downloads: 0,
        }
    }

    /// Download one asset into the cache
    ///
    /// Protocol-relative URLs (`//upload.wikimedia.org/…`) are fetched over https.
    pub async fn ensure(
        &self,
        fetcher: &dyn PageFetcher,
        iso: &IsoCode,
        kind: AssetKind,
        url: &str,
    ) -> Result<PathBuf, AssetFetchError> {
        let failure = |reason: String| AssetFetchError {
            iso: iso.clone(),
            kind,
            url: url.to_string(),
            reason,
        };

        let absolute = normalize_asset_url(url).map_err(|e| failure(format!("invalid URL: {e}")))?;
        let bytes = fetcher
            .fetch_bytes(absolute.as_str())
            .await
            .map_err(|e| failure(e.to_string()))?;

        let target = self.path_for(iso, kind);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| failure(format!("cannot create {}: {e}", parent.display())))?;
        }

        let partial = target.with_extension("png.part");
        tokio::fs::write(&partial, &bytes)
            .await
            .map_err(|e| failure(format!("cannot write {}: {e}", partial.display())))?;
        tokio::fs::rename(&partial, &target)
            .await
            .map_err(|e| failure(format!("cannot move {} into place: {e}", partial.display())))?;

        debug!("Saved {} {} ({} bytes) to {}", iso, kind, bytes.len(), target.display());
        Ok(target)
    }

    /// Download both images
    ///
    /// A failed download keeps a file already cached under that path; with
    /// nothing on disk the slot stays empty.
    pub async fn ensure_pair(&self, fetcher: &dyn PageFetcher, iso: &IsoCode, images: &ImagePair) -> CachedAssets {
        let mut assets = CachedAssets::default();

        for kind in [AssetKind::Flag, AssetKind::Location] {
            let path = match self.ensure(fetcher, iso, kind, images.url_for(kind)).await {
                Ok(path) => {
                    assets.downloads += 1;
                    Some(path)
                }
                Err(e) => {
                    warn!("⚠️ {}", e);
                    Some(self.path_for(iso, kind)).filter(|path| path.is_file())
                }
            };
            match kind {
                AssetKind::Flag => assets.flag = path,
                AssetKind::Location => assets.location = path,
            }
        }

        info!("📥 {}: downloaded {}/2 assets", iso, assets.downloads);
        assets
    }
}

/// Turn a page-relative image URL into an absolute https URL
pub fn normalize_asset_url(url: &str) -> Result<Url, url::ParseError> {
    match url.strip_prefix("//") {
        Some(rest) => Url::parse(&format!("https://{rest}")),
        None => Url::parse(url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves fixed bytes for URLs containing "ok", fails otherwise
    #[derive(Default)]
    struct StubFetcher {
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            Err(anyhow!("unexpected page fetch {url}"))
        }

        async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
            self.requested.lock().unwrap().push(url.to_string());
            if url.contains("ok") {
                Ok(b"\x89PNG fake".to_vec())
            } else {
                Err(anyhow!("HTTP error 404 Not Found: {url}"))
            }
        }
    }

    fn jp() -> IsoCode {
        IsoCode::parse("JP").unwrap()
    }

    #[test]
    fn test_paths_follow_layout() {
        let cache = AssetCache::new("public/geography");
        assert_eq!(cache.path_for(&jp(), AssetKind::Flag), PathBuf::from("public/geography/flags/JP.png"));
        assert_eq!(
            cache.path_for(&jp(), AssetKind::Location),
            PathBuf::from("public/geography/locations/JP.png")
        );
    }

    #[test]
    fn test_normalize_asset_url() {
        assert_eq!(
            normalize_asset_url("//upload.wikimedia.org/a.png").unwrap().as_str(),
            "https://upload.wikimedia.org/a.png"
        );
        assert_eq!(normalize_asset_url("http://example.org/a.png").unwrap().as_str(), "http://example.org/a.png");
        assert!(normalize_asset_url("a.png").is_err());
    }

    #[tokio::test]
    async fn test_ensure_writes_file_and_no_partial() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AssetCache::new(dir.path());
        let fetcher = StubFetcher::default();

        let path = cache.ensure(&fetcher, &jp(), AssetKind::Flag, "//upload.example/ok.png").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG fake");
        assert!(!path.with_extension("png.part").exists());
        assert_eq!(fetcher.requested.lock().unwrap().as_slice(), ["https://upload.example/ok.png"]);
    }

    #[tokio::test]
    async fn test_failed_download_leaves_slot_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AssetCache::new(dir.path());
        let fetcher = StubFetcher::default();
        let images = ImagePair {
            flag_url: "//upload.example/ok-flag.png".to_string(),
            location_url: "//upload.example/missing.png".to_string(),
        };

        let assets = cache.ensure_pair(&fetcher, &jp(), &images).await;

        assert!(assets.flag.is_some());
        assert!(assets.location.is_none());
        assert_eq!(assets.downloads, 1);
        assert!(!cache.is_complete(&jp()));
        assert_eq!(cache.cached_assets(&jp()).flag, assets.flag);
    }

    #[tokio::test]
    async fn test_failed_redownload_keeps_cached_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AssetCache::new(dir.path());
        let cached_flag = cache.path_for(&jp(), AssetKind::Flag);
        std::fs::create_dir_all(cached_flag.parent().unwrap()).unwrap();
        std::fs::write(&cached_flag, b"old flag").unwrap();

        let fetcher = StubFetcher::default();
        let images = ImagePair {
            flag_url: "//upload.example/gone-flag.png".to_string(),
            location_url: "//upload.example/ok-location.png".to_string(),
        };

        let assets = cache.ensure_pair(&fetcher, &jp(), &images).await;

        assert_eq!(assets.flag, Some(cached_flag.clone()));
        assert!(assets.location.is_some());
        assert_eq!(assets.downloads, 1);
        assert_eq!(std::fs::read(&cached_flag).unwrap(), b"old flag");
    }
}
