//! Positioned word extraction using lopdf and pdf-extract.

use std::panic::{AssertUnwindSafe, catch_unwind};

use lopdf::Document;
use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};
use tracing::{debug, trace};

use super::{PageLayout, PdfProcessor, Result, Word};
use crate::error::PdfError;
use crate::models::config::LayoutConfig;

/// PDF word extractor using lopdf for loading and pdf-extract for glyph layout.
pub struct PdfExtractor {
    document: Option<Document>,
    word_gap: f64,
    line_tolerance: f64,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        let layout = LayoutConfig::default();
        Self {
            document: None,
            word_gap: layout.word_gap,
            line_tolerance: layout.line_tolerance,
        }
    }

    /// Use the glyph grouping tolerances from a layout configuration.
    pub fn with_layout(mut self, layout: &LayoutConfig) -> Self {
        self.word_gap = layout.word_gap;
        self.line_tolerance = layout.line_tolerance;
        self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn extract_pages(&self) -> Result<Vec<PageLayout>> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        let mut collector = WordCollector::new(self.word_gap, self.line_tolerance);

        // pdf-extract panics on some malformed font programs; treat that as an
        // extraction failure of this document only.
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::output_doc(doc, &mut collector)
        }));

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(PdfError::TextExtraction(format!("{:?}", e))),
            Err(_) => {
                return Err(PdfError::TextExtraction(
                    "text extraction aborted on malformed content".to_string(),
                ));
            }
        }

        let pages = collector.finish();
        if pages.is_empty() {
            return Err(PdfError::NoPages);
        }

        debug!(
            "Extracted {} words from {} pages",
            pages.iter().map(|p| p.words.len()).sum::<usize>(),
            pages.len()
        );
        Ok(pages)
    }
}

/// Page currently being assembled by the collector.
struct PageBuilder {
    number: u32,
    origin_x: f64,
    origin_y: f64,
    width: f64,
    height: f64,
    words: Vec<Word>,
    pending: Option<Word>,
}

impl PageBuilder {
    fn flush(&mut self) {
        if let Some(mut word) = self.pending.take() {
            let trimmed = word.text.trim_end();
            if !trimmed.is_empty() {
                word.text = trimmed.to_string();
                self.words.push(word);
            }
        }
    }

    fn into_layout(mut self) -> PageLayout {
        self.flush();
        PageLayout {
            number: self.number,
            width: self.width,
            height: self.height,
            words: self.words,
        }
    }
}

/// Groups glyphs streamed by pdf-extract into positioned words.
///
/// A glyph continues the pending word when it sits on the same line and
/// starts within `word_gap` of the word's right edge. Blank glyphs are kept
/// inside a word but never start one.
struct WordCollector {
    word_gap: f64,
    line_tolerance: f64,
    pages: Vec<PageLayout>,
    current: Option<PageBuilder>,
}

impl WordCollector {
    fn new(word_gap: f64, line_tolerance: f64) -> Self {
        Self {
            word_gap,
            line_tolerance,
            pages: Vec::new(),
            current: None,
        }
    }

    fn finish(mut self) -> Vec<PageLayout> {
        if let Some(page) = self.current.take() {
            self.pages.push(page.into_layout());
        }
        self.pages
    }
}

impl OutputDev for WordCollector {
    fn begin_page(
        &mut self,
        page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> std::result::Result<(), OutputError> {
        if let Some(page) = self.current.take() {
            self.pages.push(page.into_layout());
        }

        trace!("Begin page {}", page_num);
        self.current = Some(PageBuilder {
            number: page_num,
            origin_x: media_box.llx,
            origin_y: media_box.lly,
            width: media_box.urx - media_box.llx,
            height: media_box.ury - media_box.lly,
            words: Vec::new(),
            pending: None,
        });
        Ok(())
    }

    fn end_page(&mut self) -> std::result::Result<(), OutputError> {
        if let Some(page) = self.current.take() {
            self.pages.push(page.into_layout());
        }
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> std::result::Result<(), OutputError> {
        let Some(page) = self.current.as_mut() else {
            return Ok(());
        };

        let scale = (trm.m11 * trm.m22 - trm.m12 * trm.m21).abs().sqrt();
        let size = font_size * scale;
        let x0 = trm.m31 - page.origin_x;
        let x1 = x0 + width * size;
        let top = page.height - (trm.m32 - page.origin_y) - size;

        let blank = char.trim().is_empty();

        if let Some(word) = page.pending.as_mut() {
            let same_line = (top - word.top).abs() <= self.line_tolerance;
            let adjacent = x0 >= word.x0 && x0 - word.x1 <= self.word_gap;
            if same_line && adjacent {
                word.text.push_str(char);
                word.x1 = word.x1.max(x1);
                return Ok(());
            }
        }

        page.flush();
        if !blank {
            page.pending = Some(Word::new(char, x0, x1, top));
        }
        Ok(())
    }

    fn begin_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }
}
