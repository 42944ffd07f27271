//! Item-start marker detection.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::pdf::Word;

lazy_static! {
    /// Item heading: digits followed by exactly one period.
    pub static ref ANCHOR_PATTERN: Regex = Regex::new(r"^\d+\.$").unwrap();
}

/// Start of a declared line item on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Item number printed in the heading.
    pub item_number: u32,
    /// Vertical position of the heading.
    pub top: f64,
}

/// Check if a token looks like an item heading.
pub fn is_anchor_text(text: &str) -> bool {
    ANCHOR_PATTERN.is_match(text.trim())
}

/// Parse the item number out of an anchor token.
pub fn parse_item_number(text: &str) -> Result<u32, ExtractionError> {
    let digits = text.trim().trim_end_matches('.');
    match digits.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ExtractionError::InvalidItemNumber(text.trim().to_string())),
    }
}

/// Find item headings left of `split_x`, ordered top to bottom.
///
/// Non-monotonic item numbers are reported but kept; re-flowed layouts can
/// legitimately restart numbering.
pub fn detect_anchors(words: &[Word], split_x: f64) -> Vec<Anchor> {
    let mut anchors: Vec<Anchor> = words
        .iter()
        .filter(|w| w.x0 < split_x && is_anchor_text(&w.text))
        .filter_map(|w| match parse_item_number(&w.text) {
            Ok(item_number) => Some(Anchor {
                item_number,
                top: w.top,
            }),
            Err(e) => {
                debug!("Skipping anchor candidate at top={:.1}: {}", w.top, e);
                None
            }
        })
        .collect();

    anchors.sort_by(|a, b| a.top.total_cmp(&b.top));

    for (prev, next) in out_of_order(&anchors) {
        warn!(
            "Item numbers out of order: {} at top={:.1} follows {} at top={:.1}",
            next.item_number, next.top, prev.item_number, prev.top
        );
    }

    anchors
}

/// Adjacent anchors (top-sorted) whose item number goes down.
pub fn out_of_order(anchors: &[Anchor]) -> Vec<(Anchor, Anchor)> {
    anchors
        .windows(2)
        .filter(|pair| pair[1].item_number < pair[0].item_number)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}
