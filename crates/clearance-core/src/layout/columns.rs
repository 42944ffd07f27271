//! Horizontal column assignment within a zone.

use crate::models::config::LayoutConfig;
use crate::pdf::Word;

use super::anchors::is_anchor_text;

/// Column a word belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Goods description, origin and barcode.
    Description,
    /// Tariff code and permit number.
    TariffPermit,
    /// Margin, right-hand metadata, or item headings.
    Discarded,
}

/// Raw text fragments of one zone, split by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneFragments {
    /// Description column tokens in reading order.
    pub desc: Vec<String>,
    /// Tariff/permit column tokens in reading order.
    pub ccc: Vec<String>,
}

impl ZoneFragments {
    /// Check if no fragment was collected.
    pub fn is_empty(&self) -> bool {
        self.desc.is_empty() && self.ccc.is_empty()
    }

    /// Total number of fragments.
    pub fn len(&self) -> usize {
        self.desc.len() + self.ccc.len()
    }
}

/// Assigns words to columns by their left edge.
#[derive(Debug, Clone)]
pub struct ColumnClassifier {
    desc_min_x: f64,
    split_x: f64,
    noise_start_x: f64,
    row_bucket: f64,
}

impl ColumnClassifier {
    /// Create a classifier from layout thresholds.
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            desc_min_x: layout.desc_min_x,
            split_x: layout.split_x,
            noise_start_x: layout.noise_start_x,
            row_bucket: layout.row_bucket,
        }
    }

    /// Classify a single word.
    pub fn classify(&self, word: &Word) -> Column {
        let x = word.x0;
        if x >= self.desc_min_x && x < self.split_x {
            if is_anchor_text(&word.text) {
                Column::Discarded
            } else {
                Column::Description
            }
        } else if x >= self.split_x && x < self.noise_start_x {
            Column::TariffPermit
        } else {
            Column::Discarded
        }
    }

    /// Coarse row index; ties round to even so jittered baselines land together.
    fn row_of(&self, word: &Word) -> f64 {
        (word.top / self.row_bucket).round_ties_even()
    }

    /// Order the zone's words by row bucket then left edge, and split them by column.
    pub fn collect(&self, words: &[&Word]) -> ZoneFragments {
        let mut ordered: Vec<&Word> = words.to_vec();
        ordered.sort_by(|a, b| {
            self.row_of(a)
                .total_cmp(&self.row_of(b))
                .then(a.x0.total_cmp(&b.x0))
        });

        let mut fragments = ZoneFragments::default();
        for word in ordered {
            match self.classify(word) {
                Column::Description => fragments.desc.push(word.text.clone()),
                Column::TariffPermit => fragments.ccc.push(word.text.clone()),
                Column::Discarded => {}
            }
        }
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classifier() -> ColumnClassifier {
        ColumnClassifier::new(&LayoutConfig::default())
    }

    #[test]
    fn test_column_boundaries() {
        let c = classifier();
        assert_eq!(c.classify(&Word::new("X", 5.0, 9.0, 0.0)), Column::Discarded);
        assert_eq!(c.classify(&Word::new("X", 10.0, 14.0, 0.0)), Column::Description);
        assert_eq!(c.classify(&Word::new("X", 201.9, 205.0, 0.0)), Column::Description);
        assert_eq!(c.classify(&Word::new("X", 202.0, 205.0, 0.0)), Column::TariffPermit);
        assert_eq!(c.classify(&Word::new("X", 314.9, 320.0, 0.0)), Column::TariffPermit);
        assert_eq!(c.classify(&Word::new("X", 315.0, 320.0, 0.0)), Column::Discarded);
    }

    #[test]
    fn test_heading_token_is_not_description() {
        let c = classifier();
        assert_eq!(c.classify(&Word::new("12.", 20.0, 30.0, 0.0)), Column::Discarded);
        assert_eq!(c.classify(&Word::new("12.5", 20.0, 30.0, 0.0)), Column::Description);
    }

    #[test]
    fn test_reading_order_tolerates_jitter() {
        let c = classifier();
        let words = [
            Word::new("TRAY", 90.0, 110.0, 101.0),
            Word::new("MELAMINE", 40.0, 85.0, 99.0),
            Word::new("4550480496986", 40.0, 100.0, 110.0),
            Word::new("CI", 210.0, 220.0, 110.0),
            Word::new("3924", 210.0, 230.0, 100.0),
            Word::new("KGM 12", 330.0, 360.0, 100.0),
        ];
        let refs: Vec<&Word> = words.iter().collect();
        let fragments = c.collect(&refs);
        assert_eq!(fragments.desc, vec!["MELAMINE", "TRAY", "4550480496986"]);
        assert_eq!(fragments.ccc, vec!["3924", "CI"]);
        assert_eq!(fragments.len(), 5);
    }
}
