//! PDF processing module.
//!
//! Produces positioned words per page. Everything downstream works on
//! [`PageLayout`] values, so the layout engine never touches a PDF object.

mod extractor;

pub use extractor::PdfExtractor;

use serde::{Deserialize, Serialize};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A positioned text token on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Token text.
    pub text: String,
    /// Left edge.
    pub x0: f64,
    /// Right edge.
    pub x1: f64,
    /// Vertical offset of the token's top edge from the page top.
    pub top: f64,
}

impl Word {
    /// Create a word.
    pub fn new(text: impl Into<String>, x0: f64, x1: f64, top: f64) -> Self {
        Self {
            text: text.into(),
            x0,
            x1,
            top,
        }
    }
}

/// Words and dimensions of a single page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number (1-indexed).
    pub number: u32,
    /// Page width.
    pub width: f64,
    /// Page height.
    pub height: f64,
    /// Words in extraction order.
    pub words: Vec<Word>,
}

impl PageLayout {
    /// Rebuild plain text by grouping words into lines.
    ///
    /// Words whose tops differ by at most `line_tolerance` share a line;
    /// lines are emitted top to bottom, words left to right.
    pub fn text(&self, line_tolerance: f64) -> String {
        let mut words: Vec<&Word> = self.words.iter().collect();
        words.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.x0.total_cmp(&b.x0)));

        let mut lines: Vec<Vec<&Word>> = Vec::new();
        let mut line_top = f64::NEG_INFINITY;

        for word in words {
            match lines.last_mut() {
                Some(line) if (word.top - line_top).abs() <= line_tolerance => line.push(word),
                _ => {
                    line_top = word.top;
                    lines.push(vec![word]);
                }
            }
        }

        lines
            .into_iter()
            .map(|mut line| {
                line.sort_by(|a, b| a.x0.total_cmp(&b.x0));
                line.iter()
                    .map(|w| w.text.trim())
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Extract positioned words for every page.
    fn extract_pages(&self) -> Result<Vec<PageLayout>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_text_groups_lines() {
        let page = PageLayout {
            number: 1,
            width: 595.0,
            height: 842.0,
            words: vec![
                Word::new("AA/", 120.0, 135.0, 40.4),
                Word::new("進口報單", 20.0, 80.0, 20.0),
                Word::new("12/345/X1", 136.0, 180.0, 41.5),
                Word::new("報單號碼", 20.0, 80.0, 40.0),
            ],
        };
        assert_eq!(page.text(3.0), "進口報單\n報單號碼 AA/ 12/345/X1");
    }

    #[test]
    fn test_page_text_empty() {
        assert_eq!(PageLayout::default().text(3.0), "");
    }
}
