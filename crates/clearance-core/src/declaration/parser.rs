//! Document-level declaration parser.
//!
//! Pages are zoned in order, threading the carried item from one page to the
//! next. Fragments accumulate in one [`LineItemDraft`] per item number and are
//! resolved once after the last page.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{ExtractionError, Result};
use crate::layout::LayoutEngine;
use crate::models::config::ClearanceConfig;
use crate::models::declaration::{Declaration, LineItemDraft, ResolvedLineItem};
use crate::pdf::{PageLayout, PdfExtractor, PdfProcessor};

use super::DocumentParser;
use super::rules::{
    ComplianceRules, DescriptionResolver, UNKNOWN_DECLARATION, extract_declaration_number,
    resolve_tariff_permit,
};

/// Result of parsing one declaration document.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Resolved declaration.
    pub declaration: Declaration,
    /// Data-quality warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Layout-based declaration parser.
pub struct DeclarationParser {
    layout: LayoutEngine,
    description: DescriptionResolver,
    compliance: ComplianceRules,
    config: ClearanceConfig,
}

impl DeclarationParser {
    /// Create a parser; rule tables are compiled once here.
    pub fn new(config: &ClearanceConfig) -> Result<Self> {
        Ok(Self {
            layout: LayoutEngine::new(&config.layout, &config.rules),
            description: DescriptionResolver::new(&config.rules)?,
            compliance: ComplianceRules::new(&config.rules),
            config: config.clone(),
        })
    }

    /// Read the declaration number from the first page.
    pub fn declaration_number(&self, pages: &[PageLayout]) -> String {
        pages
            .first()
            .map(|p| p.text(self.config.layout.line_tolerance))
            .and_then(|text| extract_declaration_number(&text))
            .unwrap_or_else(|| UNKNOWN_DECLARATION.to_string())
    }

    /// Zone every page and accumulate fragments per item.
    pub fn collect_drafts(
        &self,
        pages: &[PageLayout],
        decl_no: &str,
        warnings: &mut Vec<String>,
    ) -> BTreeMap<u32, LineItemDraft> {
        let mut drafts: BTreeMap<u32, LineItemDraft> = BTreeMap::new();
        let mut carried = None;

        for page in pages {
            let zoning = self.layout.zone_page(page, carried);
            carried = zoning.carried;

            for content in zoning.zones {
                let Some(item_no) = content.zone.item_id else {
                    if !content.fragments.is_empty() {
                        let message = format!(
                            "page {}: dropped {} fragments above the first item",
                            page.number,
                            content.fragments.len()
                        );
                        debug!("{}", message);
                        warnings.push(message);
                    }
                    continue;
                };

                let draft = drafts
                    .entry(item_no)
                    .or_insert_with(|| LineItemDraft::new(item_no, decl_no));
                draft.desc_parts.extend(content.fragments.desc);
                draft.ccc_parts.extend(content.fragments.ccc);
            }
        }

        drafts
    }

    /// Resolve a draft into its terminal record.
    pub fn resolve(&self, draft: &LineItemDraft) -> ResolvedLineItem {
        let tariff = resolve_tariff_permit(&draft.ccc_parts);
        let fields = self.description.resolve(&draft.desc_parts);
        let note = self.compliance.note(&tariff.tariff_code, &tariff.permit_number);

        ResolvedLineItem {
            decl_no: draft.decl_no.clone(),
            item_no: draft.item_no,
            barcode: fields.barcode,
            description: fields.description,
            tariff_code: tariff.tariff_code,
            permit_number: tariff.permit_number,
            country: fields.country,
            note,
            source_file: None,
        }
    }

    /// Parse already-extracted pages.
    pub fn parse_pages(&self, pages: &[PageLayout]) -> Result<ExtractionResult> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let decl_no = self.declaration_number(pages);
        if decl_no == UNKNOWN_DECLARATION {
            warnings.push("Could not extract declaration number".to_string());
        }

        let drafts = self.collect_drafts(pages, &decl_no, &mut warnings);
        if drafts.is_empty() {
            return Err(ExtractionError::NoItems.into());
        }

        let items: Vec<ResolvedLineItem> = drafts
            .values()
            .map(|draft| {
                let item = self.resolve(draft);
                let missing = item.unresolved_fields();
                if !missing.is_empty() {
                    warnings.push(format!(
                        "item {}: unresolved {}",
                        item.item_no,
                        missing.join(", ")
                    ));
                }
                item
            })
            .collect();

        info!("Declaration {}: {} items from {} pages", decl_no, items.len(), pages.len());

        Ok(ExtractionResult {
            declaration: Declaration { decl_no, items },
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Parse an in-memory PDF.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<ExtractionResult> {
        let mut extractor = PdfExtractor::new().with_layout(&self.config.layout);
        extractor.load(data)?;
        let pages = extractor.extract_pages()?;
        debug!("PDF has {} pages", pages.len());
        self.parse_pages(&pages)
    }
}

impl DocumentParser for DeclarationParser {
    fn parse_file(&self, path: &Path) -> Result<ExtractionResult> {
        let data = fs::read(path)?;
        let result = self.parse_bytes(&data)?;
        for warning in &result.warnings {
            warn!("{}: {}", path.display(), warning);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClearanceError;
    use crate::pdf::Word;
    use pretty_assertions::assert_eq;

    fn parser() -> DeclarationParser {
        DeclarationParser::new(&ClearanceConfig::default()).unwrap()
    }

    fn page(number: u32, words: Vec<Word>) -> PageLayout {
        PageLayout {
            number,
            width: 595.0,
            height: 842.0,
            words,
        }
    }

    /// Lay out fragments left to right on one row of a column.
    fn row(x_start: f64, top: f64, fragments: &[&str]) -> Vec<Word> {
        let mut x = x_start;
        fragments
            .iter()
            .map(|text| {
                let word = Word::new(*text, x, x + 4.0, top);
                x += 5.0;
                word
            })
            .collect()
    }

    fn two_item_page() -> PageLayout {
        let mut words = vec![
            Word::new("報單號碼", 20.0, 60.0, 20.0),
            Word::new("AA/ 13/ 123/A1B2", 70.0, 150.0, 20.0),
            Word::new("1.", 20.0, 28.0, 100.0),
            Word::new("2.", 20.0, 28.0, 300.0),
        ];
        words.extend(row(40.0, 100.0, &["Oval", "Melamine", "Tray"]));
        words.extend(row(40.0, 120.0, &["4550480496986", "THAILAND TH"]));
        words.extend(row(
            210.0,
            100.0,
            &["39", "24", ".", "10", ".", "00", ".", "90-6", "CI", "123456789012"],
        ));
        words.extend(row(40.0, 300.0, &["Glockenspiel", "Piano"]));
        words.extend(row(40.0, 320.0, &["4549892963605", "CHINA CN"]));
        words.extend(row(
            210.0,
            300.0,
            &["IFB", "A1234567890", "9503", ".", "00", ".", "71", ".", "00-8"],
        ));
        words.push(Word::new("KGM 24", 330.0, 360.0, 300.0));
        page(1, words)
    }

    #[test]
    fn test_two_item_document() {
        let result = parser().parse_pages(&[two_item_page()]).unwrap();
        let declaration = result.declaration;

        assert_eq!(declaration.decl_no, "AA/13/123/A1B2");
        assert_eq!(declaration.len(), 2);

        let first = &declaration.items[0];
        assert_eq!(first.item_no, 1);
        assert_eq!(first.tariff_code, "3924.10.00.90-6");
        assert_eq!(first.permit_number, "CI123456789012");
        assert_eq!(first.barcode, "4550480496986");
        assert_eq!(first.country, "THAILAND TH");
        assert_eq!(first.description, "Oval Melamine Tray");
        assert!(first.note.contains("一般查驗"));
        assert!(first.note.contains("塑膠/美耐皿檢驗"));

        let second = &declaration.items[1];
        assert_eq!(second.item_no, 2);
        assert_eq!(second.tariff_code, "9503.00.71.00-8");
        assert_eq!(second.permit_number, "IFBA1234567890");
        assert_eq!(second.country, "CHINA CN");
        assert_eq!(second.description, "Glockenspiel Piano");
        assert!(second.note.contains("BSMI"));
        assert!(!second.note.contains("一般查驗"));
    }

    #[test]
    fn test_item_continues_across_pages() {
        let first = page(
            1,
            vec![
                Word::new("1.", 20.0, 28.0, 700.0),
                Word::new("Bamboo", 40.0, 70.0, 700.0),
                Word::new("3924.10.00", 210.0, 250.0, 700.0),
            ],
        );
        let second = page(
            2,
            vec![
                Word::new("Brush", 40.0, 70.0, 40.0),
                Word::new(".90", 210.0, 230.0, 40.0),
                Word::new("2.", 20.0, 28.0, 200.0),
                Word::new("Clock", 40.0, 70.0, 200.0),
            ],
        );
        let third = page(3, vec![Word::new("JAPAN JP", 40.0, 80.0, 50.0)]);

        let result = parser().parse_pages(&[first, second, third]).unwrap();
        let items = &result.declaration.items;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description, "Bamboo Brush");
        assert_eq!(items[0].tariff_code, "3924.10.00.90");
        assert_eq!(items[1].description, "Clock");
        assert_eq!(items[1].country, "JAPAN JP");
        assert_eq!(result.declaration.decl_no, UNKNOWN_DECLARATION);
    }

    #[test]
    fn test_text_before_first_item_is_dropped() {
        let p = page(
            1,
            vec![
                Word::new("Stray", 40.0, 70.0, 50.0),
                Word::new("1.", 20.0, 28.0, 100.0),
                Word::new("Cup", 40.0, 60.0, 100.0),
            ],
        );
        let result = parser().parse_pages(&[p]).unwrap();
        assert_eq!(result.declaration.items[0].description, "Cup");
        assert!(result.warnings.iter().any(|w| w.contains("dropped 1 fragments")));
    }

    #[test]
    fn test_items_sorted_by_number() {
        let p = page(
            1,
            vec![
                Word::new("3.", 20.0, 28.0, 100.0),
                Word::new("1.", 20.0, 28.0, 300.0),
            ],
        );
        let result = parser().parse_pages(&[p]).unwrap();
        let numbers: Vec<u32> = result.declaration.items.iter().map(|i| i.item_no).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn test_document_without_items_fails() {
        let p = page(1, vec![Word::new("進口報單", 20.0, 60.0, 20.0)]);
        let err = parser().parse_pages(&[p]).unwrap_err();
        assert!(matches!(err, ClearanceError::Extraction(ExtractionError::NoItems)));
    }

    #[test]
    fn test_parse_bytes_rejects_garbage() {
        let err = parser().parse_bytes(b"%PDF-garbage").unwrap_err();
        assert!(matches!(err, ClearanceError::Pdf(_)));
    }
}
