//! Flag / location-map classification of detail-page images
//!
//! Candidates are the page's `<img>` elements in document order, capped at
//! [`MAX_CANDIDATES`] (later images are footer and navigation icons). Each
//! candidate is tested against an ordered rule list; the first rule whose
//! category is still unbound and whose predicate matches binds the image.

use scraper::{Html, Selector};
use tracing::debug;

use super::compile_selector;
use crate::domain::PipelineResult;

/// Images past this index are never considered
pub const MAX_CANDIDATES: usize = 30;

/// Stand-in used on pages of territories without a flag of their own
pub const PLACEHOLDER_FLAG: &str = "Flag_of_None.svg.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageCategory {
    Location,
    Flag,
}

/// How a rule inspects a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMatcher {
    /// Alt text ends with the given suffix
    AltSuffix(&'static str),
    /// Source URL contains the given substring
    SrcContains(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub category: ImageCategory,
    pub matcher: RuleMatcher,
}

impl ClassificationRule {
    const fn new(category: ImageCategory, matcher: RuleMatcher) -> Self {
        Self { category, matcher }
    }

    pub fn matches(&self, candidate: &ImageCandidate) -> bool {
        match self.matcher {
            RuleMatcher::AltSuffix(suffix) => candidate.alt.ends_with(suffix),
            RuleMatcher::SrcContains(needle) => candidate.src.contains(needle),
        }
    }
}

/// Rules in priority order: every location rule outranks every flag rule
pub const DEFAULT_RULES: &[ClassificationRule] = &[
    // "…の位置" / "…の位置図": "location of …" / "location map of …"
    ClassificationRule::new(ImageCategory::Location, RuleMatcher::AltSuffix("の位置")),
    ClassificationRule::new(ImageCategory::Location, RuleMatcher::AltSuffix("の位置図")),
    ClassificationRule::new(ImageCategory::Location, RuleMatcher::SrcContains("on_the_globe")),
    ClassificationRule::new(ImageCategory::Location, RuleMatcher::SrcContains("in_the_world")),
    ClassificationRule::new(ImageCategory::Location, RuleMatcher::SrcContains("Location")),
    ClassificationRule::new(ImageCategory::Location, RuleMatcher::SrcContains("Taiwan2014.svg")),
    ClassificationRule::new(ImageCategory::Flag, RuleMatcher::SrcContains("Flag_of")),
    ClassificationRule::new(ImageCategory::Flag, RuleMatcher::SrcContains("Proposed_flag_of")),
];

/// One `<img>` of a detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageCandidate {
    pub alt: String,
    pub src: String,
}

impl ImageCandidate {
    pub fn new(alt: &str, src: &str) -> Self {
        Self {
            alt: alt.to_string(),
            src: src.to_string(),
        }
    }
}

/// Result of scanning a page: raw (not yet rewritten) URLs per category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageScan {
    pub location: Option<String>,
    pub flag: Option<String>,
}

impl ImageScan {
    fn slot(&mut self, category: ImageCategory) -> &mut Option<String> {
        match category {
            ImageCategory::Location => &mut self.location,
            ImageCategory::Flag => &mut self.flag,
        }
    }

    fn is_complete(&self) -> bool {
        self.location.is_some() && self.flag.is_some()
    }

    /// The bound flag is the "no flag" placeholder
    pub fn has_placeholder_flag(&self) -> bool {
        self.flag.as_deref().is_some_and(|url| url.contains(PLACEHOLDER_FLAG))
    }
}

pub struct ImageClassifier {
    rules: &'static [ClassificationRule],
    max_candidates: usize,
    img: Selector,
}

impl ImageClassifier {
    pub fn new() -> PipelineResult<Self> {
        Self::with_rules(DEFAULT_RULES, MAX_CANDIDATES)
    }

    pub fn with_rules(rules: &'static [ClassificationRule], max_candidates: usize) -> PipelineResult<Self> {
        Ok(Self {
            rules,
            max_candidates,
            img: compile_selector("img")?,
        })
    }

    /// First `max_candidates` images of the page in document order
    pub fn extract_candidates(&self, html: &Html) -> Vec<ImageCandidate> {
        html.select(&self.img)
            .take(self.max_candidates)
            .map(|img| {
                let element = img.value();
                ImageCandidate::new(element.attr("alt").unwrap_or_default(), element.attr("src").unwrap_or_default())
            })
            .collect()
    }

    /// Bind at most one image per category; an image binds at most one category
    pub fn classify(&self, candidates: &[ImageCandidate]) -> ImageScan {
        let mut scan = ImageScan::default();

        for (index, candidate) in candidates.iter().enumerate() {
            if scan.is_complete() {
                break;
            }

            let rule = self
                .rules
                .iter()
                .find(|rule| scan.slot(rule.category).is_none() && rule.matches(candidate));

            if let Some(rule) = rule {
                debug!("Image #{} bound as {:?} by {:?}: {}", index, rule.category, rule.matcher, candidate.src);
                *scan.slot(rule.category) = Some(candidate.src.clone());
            }
        }

        scan
    }

    pub fn scan_document(&self, html: &Html) -> ImageScan {
        self.classify(&self.extract_candidates(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn classifier() -> ImageClassifier {
        ImageClassifier::new().unwrap()
    }

    #[rstest]
    #[case("日本の位置", "//upload.wikimedia.org/x/Japan.png", Some(ImageCategory::Location))]
    #[case("日本の位置図", "//upload.wikimedia.org/x/Japan.png", Some(ImageCategory::Location))]
    #[case("", "//upload.wikimedia.org/thumb/JPN_orthographic.svg/250px-Japan_on_the_globe.svg.png", Some(ImageCategory::Location))]
    #[case("", "//upload.wikimedia.org/thumb/a/b/Chad_in_the_world.svg/250px-Chad_in_the_world.svg.png", Some(ImageCategory::Location))]
    #[case("", "//upload.wikimedia.org/thumb/a/b/LocationMali.svg/250px-LocationMali.svg.png", Some(ImageCategory::Location))]
    #[case("", "//upload.wikimedia.org/thumb/a/b/Taiwan2014.svg/250px-Taiwan2014.svg.png", Some(ImageCategory::Location))]
    #[case("", "//upload.wikimedia.org/thumb/a/b/Flag_of_Japan.svg/250px-Flag_of_Japan.svg.png", Some(ImageCategory::Flag))]
    #[case("", "//upload.wikimedia.org/thumb/a/b/Proposed_flag_of_X.svg/120px-Proposed_flag_of_X.svg.png", Some(ImageCategory::Flag))]
    #[case("位置", "//upload.wikimedia.org/thumb/a/b/Coat_of_arms.svg/100px-Coat_of_arms.svg.png", None)]
    fn test_single_candidate_category(#[case] alt: &str, #[case] src: &str, #[case] expected: Option<ImageCategory>) {
        let scan = classifier().classify(&[ImageCandidate::new(alt, src)]);

        let got = match (scan.location, scan.flag) {
            (Some(_), None) => Some(ImageCategory::Location),
            (None, Some(_)) => Some(ImageCategory::Flag),
            (None, None) => None,
            (Some(_), Some(_)) => panic!("one image bound twice"),
        };
        assert_eq!(got, expected);
    }

    #[test]
    fn test_first_match_in_document_order_wins() {
        let candidates = vec![
            ImageCandidate::new("", "//u/thumb/Flag_of_Japan.svg/250px-Flag_of_Japan.svg.png"),
            ImageCandidate::new("", "//u/thumb/Flag_of_Tokyo.svg/40px-Flag_of_Tokyo.svg.png"),
            ImageCandidate::new("日本の位置", "//u/thumb/Japan.svg/250px-Japan.svg.png"),
            ImageCandidate::new("", "//u/thumb/Japan_on_the_globe.svg/250px-Japan_on_the_globe.svg.png"),
        ];

        let scan = classifier().classify(&candidates);
        assert_eq!(scan.flag.as_deref(), Some("//u/thumb/Flag_of_Japan.svg/250px-Flag_of_Japan.svg.png"));
        assert_eq!(scan.location.as_deref(), Some("//u/thumb/Japan.svg/250px-Japan.svg.png"));
    }

    #[test]
    fn test_image_matching_both_falls_through_to_flag_once_location_bound() {
        let candidates = vec![
            ImageCandidate::new("フランスの位置", "//u/France.png"),
            ImageCandidate::new("", "//u/thumb/Flag_of_France_Location.svg/250px-Flag_of_France_Location.svg.png"),
        ];

        let scan = classifier().classify(&candidates);
        assert_eq!(scan.location.as_deref(), Some("//u/France.png"));
        assert!(scan.flag.as_deref().is_some_and(|f| f.contains("Flag_of_France_Location")));
    }

    #[test]
    fn test_placeholder_flag_detected() {
        let scan = classifier().classify(&[ImageCandidate::new("", "//u/thumb/Flag_of_None.svg/250px-Flag_of_None.svg.png")]);
        assert!(scan.has_placeholder_flag());
    }

    #[test]
    fn test_candidates_capped_at_thirty() {
        let mut body = String::new();
        for i in 0..MAX_CANDIDATES {
            body.push_str(&format!(r#"<img alt="icon {i}" src="//u/icon{i}.png">"#));
        }
        body.push_str(r#"<img alt="" src="//u/thumb/Flag_of_Japan.svg/250px-Flag_of_Japan.svg.png">"#);
        let html = Html::parse_document(&format!("<html><body>{body}</body></html>"));

        let classifier = classifier();
        assert_eq!(classifier.extract_candidates(&html).len(), MAX_CANDIDATES);
        assert_eq!(classifier.scan_document(&html).flag, None);
    }
}
