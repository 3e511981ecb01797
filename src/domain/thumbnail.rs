//! Wikimedia thumbnail width rewriting
//!
//! Scaled renditions live under `/thumb/` with the width encoded as the
//! leading `<N>px-` token of the last path segment, e.g.
//! `…/thumb/9/9e/Flag_of_Japan.svg/250px-Flag_of_Japan.svg.png`.
//! Detail pages embed small renditions; the dataset wants larger ones.

use super::country::{AssetKind, IsoCode};
use super::errors::{PipelineError, PipelineResult};

const THUMB_MARKER: &str = "/thumb/";
const SVG_RASTER_SUFFIX: &str = ".svg.png";
const RASTER_SUFFIX: &str = ".png";

/// (source width, target width, applies to flags)
const WIDTH_RULES: &[(u32, u32, bool)] = &[
    (250, 700, true),
    (40, 700, true),
    (120, 500, true),
    (330, 700, false),
];

/// Codes whose location map is a plain raster thumbnail rather than an SVG rendition
const RASTER_LOCATION_OVERRIDES: &[&str] = &["AT"];

/// Split `…/250px-Name.svg.png` into (`…/`, 250, `Name.svg.png`)
fn split_width_token(url: &str) -> Option<(&str, u32, &str)> {
    let segment_start = url.rfind('/')? + 1;
    let (prefix, segment) = url.split_at(segment_start);
    let (digits, rest) = segment.split_once("px-")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((prefix, digits.parse().ok()?, rest))
}

fn with_width(prefix: &str, width: u32, rest: &str) -> String {
    format!("{prefix}{width}px-{rest}")
}

/// Rewrite a resolved image URL to the canonical rendition width
///
/// URLs that are not thumbnails pass through untouched. An SVG-sourced
/// thumbnail whose width token has no rule is an error: it means the
/// source started serving a size this pipeline has never seen.
pub fn rewrite_thumbnail(url: &str, iso: &IsoCode, kind: AssetKind) -> PipelineResult<String> {
    if !url.contains(THUMB_MARKER) {
        return Ok(url.to_string());
    }

    let unhandled = || PipelineError::ThumbnailRewrite {
        iso: iso.clone(),
        kind,
        url: url.to_string(),
    };

    if url.ends_with(SVG_RASTER_SUFFIX) {
        let (prefix, width, rest) = split_width_token(url).ok_or_else(unhandled)?;
        let is_flag = kind == AssetKind::Flag;

        return WIDTH_RULES
            .iter()
            .find(|(from, _, flags_too)| *from == width && (*flags_too || !is_flag))
            .map(|(_, to, _)| with_width(prefix, *to, rest))
            .ok_or_else(unhandled);
    }

    if url.ends_with(RASTER_SUFFIX) && kind == AssetKind::Location && RASTER_LOCATION_OVERRIDES.contains(&iso.as_str())
    {
        if let Some((prefix, 250, rest)) = split_width_token(url) {
            return Ok(with_width(prefix, 700, rest));
        }
    }

    Ok(url.to_string())
}
