//! Geometric layout analysis of declaration pages.
//!
//! A page goes through four steps: furniture tokens are dropped
//! ([`noise`]), item headings are located ([`anchors`]), the page is cut
//! into one vertical band per item ([`zones`]) and each band's words are
//! split into the description and tariff/permit columns ([`columns`]).

pub mod anchors;
pub mod columns;
pub mod noise;
pub mod zones;

pub use anchors::{Anchor, detect_anchors, is_anchor_text, out_of_order};
pub use columns::{Column, ColumnClassifier, ZoneFragments};
pub use noise::NoiseFilter;
pub use zones::{Zone, segment_page};

use tracing::trace;

use crate::models::config::{LayoutConfig, RuleConfig};
use crate::pdf::{PageLayout, Word};

/// A zone together with the fragments that fell inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneContent {
    /// Vertical band.
    pub zone: Zone,
    /// Column-split text inside the band.
    pub fragments: ZoneFragments,
}

/// Result of zoning one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageZoning {
    /// Zones top to bottom.
    pub zones: Vec<ZoneContent>,
    /// Item to carry into the next page.
    pub carried: Option<u32>,
}

/// Runs noise filtering, anchoring, zoning and column assignment for a page.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    noise: NoiseFilter,
    classifier: ColumnClassifier,
    split_x: f64,
    top_epsilon: f64,
}

impl LayoutEngine {
    /// Create an engine from layout thresholds and the noise keyword table.
    pub fn new(layout: &LayoutConfig, rules: &RuleConfig) -> Self {
        Self {
            noise: NoiseFilter::new(&rules.noise_keywords),
            classifier: ColumnClassifier::new(layout),
            split_x: layout.split_x,
            top_epsilon: layout.top_epsilon,
        }
    }

    /// Zone a page. A pure function of the page and the carried item.
    pub fn zone_page(&self, page: &PageLayout, carried: Option<u32>) -> PageZoning {
        let words: Vec<Word> = page
            .words
            .iter()
            .filter(|w| !self.noise.is_noise(&w.text))
            .cloned()
            .collect();

        trace!(
            "Page {}: {} of {} words kept after noise filter",
            page.number,
            words.len(),
            page.words.len()
        );

        let anchors = detect_anchors(&words, self.split_x);
        let (zones, carried) = segment_page(&anchors, page.height, carried, self.top_epsilon);

        let zones = zones
            .into_iter()
            .map(|zone| {
                let inside: Vec<&Word> = words.iter().filter(|w| zone.contains(w.top)).collect();
                ZoneContent {
                    zone,
                    fragments: self.classifier.collect(&inside),
                }
            })
            .collect();

        PageZoning { zones, carried }
    }
}
