//! Flag and location-map resolution for one country
//!
//! Order of resolution:
//! 1. A static per-country override, if any (no page fetch)
//! 2. Otherwise the detail page is fetched and its images classified
//! 3. Both URLs are rewritten to the canonical thumbnail width

use scraper::Html;
use tracing::{debug, info};
use url::Url;

use crate::domain::{AssetKind, ImagePair, IsoCode, PageFetcher, PipelineError, PipelineResult, SkipReason, rewrite_thumbnail};
use crate::infrastructure::parsing::{ImageClassifier, ImageScan};

/// (ISO code, location URL, flag URL) for pages that carry no usable images
const STATIC_OVERRIDES: &[(&str, &str, &str)] = &[(
    // Bouvet Island is a Norwegian dependency
    "BV",
    "//upload.wikimedia.org/wikipedia/commons/thumb/3/38/Bouvet-pos.png/250px-Bouvet-pos.png",
    "//upload.wikimedia.org/wikipedia/commons/thumb/d/d9/Flag_of_Norway.svg/250px-Flag_of_Norway.svg.png",
)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageResolution {
    Resolved(ImagePair),
    Unresolved(SkipReason),
}

pub struct ImageResolver<'a> {
    fetcher: &'a dyn PageFetcher,
    classifier: ImageClassifier,
}

impl<'a> ImageResolver<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher) -> PipelineResult<Self> {
        Ok(Self {
            fetcher,
            classifier: ImageClassifier::new()?,
        })
    }

    fn static_override(iso: &IsoCode) -> Option<ImageScan> {
        STATIC_OVERRIDES
            .iter()
            .find(|(code, _, _)| *code == iso.as_str())
            .map(|(_, location, flag)| ImageScan {
                location: Some((*location).to_string()),
                flag: Some((*flag).to_string()),
            })
    }

    /// Resolve the image pair for a country
    ///
    /// A failed page fetch is fatal; missing or placeholder images are a skip.
    pub async fn resolve(&self, iso: &IsoCode, detail_url: &Url) -> PipelineResult<ImageResolution> {
        let scan = match Self::static_override(iso) {
            Some(scan) => {
                info!("📌 {}: using static image override", iso);
                scan
            }
            None => {
                let body = self
                    .fetcher
                    .fetch_text(detail_url.as_str())
                    .await
                    .map_err(|e| PipelineError::fetch(detail_url.as_str(), e))?;
                let html = Html::parse_document(&body);
                self.classifier.scan_document(&html)
            }
        };

        Self::finish(iso, scan)
    }

    /// Validate a scan and rewrite both URLs
    pub fn finish(iso: &IsoCode, scan: ImageScan) -> PipelineResult<ImageResolution> {
        if scan.has_placeholder_flag() {
            return Ok(ImageResolution::Unresolved(SkipReason::PlaceholderFlag { iso: iso.clone() }));
        }

        let (location, flag) = match (scan.location, scan.flag) {
            (Some(location), Some(flag)) => (location, flag),
            (location, _) => {
                let missing = if location.is_none() { "location" } else { "flag" };
                return Ok(ImageResolution::Unresolved(SkipReason::ImageUnresolved {
                    iso: iso.clone(),
                    missing,
                }));
            }
        };

        let pair = ImagePair {
            flag_url: rewrite_thumbnail(&flag, iso, AssetKind::Flag)?,
            location_url: rewrite_thumbnail(&location, iso, AssetKind::Location)?,
        };
        debug!("{}: flag {} / location {}", iso, pair.flag_url, pair.location_url);
        Ok(ImageResolution::Resolved(pair))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;

    struct SinglePage(&'static str);

    #[async_trait]
    impl PageFetcher for SinglePage {
        async fn fetch_text(&self, _url: &str) -> Result<String> {
            Ok(self.0.to_string())
        }

        async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
            Err(anyhow!("unexpected download {url}"))
        }
    }

    struct Offline;

    #[async_trait]
    impl PageFetcher for Offline {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            Err(anyhow!("connection refused: {url}"))
        }

        async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
            Err(anyhow!("connection refused: {url}"))
        }
    }

    fn iso(code: &str) -> IsoCode {
        IsoCode::parse(code).unwrap()
    }

    fn page_url() -> Url {
        Url::parse("https://ja.wikipedia.org/wiki/Country").unwrap()
    }

    #[tokio::test]
    async fn test_resolves_and_rewrites_page_images() {
        let fetcher = SinglePage(
            r#"<html><body>
            <img alt="" src="//u/thumb/a/ab/Flag_of_Japan.svg/250px-Flag_of_Japan.svg.png">
            <img alt="日本の位置" src="//u/thumb/c/cd/Japan_(orthographic).svg/120px-Japan_(orthographic).svg.png">
            </body></html>"#,
        );

        let resolution = ImageResolver::new(&fetcher).unwrap().resolve(&iso("JP"), &page_url()).await.unwrap();

        assert_eq!(
            resolution,
            ImageResolution::Resolved(ImagePair {
                flag_url: "//u/thumb/a/ab/Flag_of_Japan.svg/700px-Flag_of_Japan.svg.png".to_string(),
                location_url: "//u/thumb/c/cd/Japan_(orthographic).svg/500px-Japan_(orthographic).svg.png".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_missing_location_is_unresolved() {
        let fetcher = SinglePage(r#"<img src="//u/thumb/a/ab/Flag_of_X.svg/250px-Flag_of_X.svg.png">"#);

        let resolution = ImageResolver::new(&fetcher).unwrap().resolve(&iso("XK"), &page_url()).await.unwrap();
        assert_eq!(
            resolution,
            ImageResolution::Unresolved(SkipReason::ImageUnresolved {
                iso: iso("XK"),
                missing: "location"
            })
        );
    }

    #[tokio::test]
    async fn test_placeholder_flag_is_unresolved() {
        let fetcher = SinglePage(
            r#"<img alt="Xの位置" src="//u/X.png"><img src="//u/thumb/a/ab/Flag_of_None.svg/250px-Flag_of_None.svg.png">"#,
        );

        let resolution = ImageResolver::new(&fetcher).unwrap().resolve(&iso("UM"), &page_url()).await.unwrap();
        assert!(matches!(resolution, ImageResolution::Unresolved(SkipReason::PlaceholderFlag { .. })));
    }

    #[tokio::test]
    async fn test_static_override_skips_page_fetch() {
        let resolution = ImageResolver::new(&Offline).unwrap().resolve(&iso("BV"), &page_url()).await.unwrap();

        let ImageResolution::Resolved(pair) = resolution else {
            panic!("override not applied");
        };
        assert!(pair.flag_url.ends_with("/700px-Flag_of_Norway.svg.png"));
        assert!(pair.location_url.ends_with("/250px-Bouvet-pos.png"));
    }

    #[tokio::test]
    async fn test_page_fetch_failure_is_fatal() {
        let err = ImageResolver::new(&Offline).unwrap().resolve(&iso("JP"), &page_url()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Fetch { .. }));
    }

    #[test]
    fn test_unhandled_thumbnail_width_is_fatal() {
        let scan = ImageScan {
            location: Some("//u/X.png".to_string()),
            flag: Some("//u/thumb/a/ab/Flag_of_X.svg/330px-Flag_of_X.svg.png".to_string()),
        };

        let err = ImageResolver::finish(&iso("JP"), scan).unwrap_err();
        assert!(matches!(err, PipelineError::ThumbnailRewrite { .. }));
    }
}
