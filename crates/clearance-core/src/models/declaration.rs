//! Declaration line item models.

use serde::{Deserialize, Serialize};

/// Raw text fragments collected for one line item while a document is parsed.
///
/// Fragments are only ever appended; resolution into a [`ResolvedLineItem`]
/// happens once, after every page has been zoned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemDraft {
    /// Item number printed next to the item heading.
    pub item_no: u32,

    /// Declaration number of the owning document.
    pub decl_no: String,

    /// Description column fragments in reading order.
    pub desc_parts: Vec<String>,

    /// Tariff/permit column fragments in reading order.
    pub ccc_parts: Vec<String>,
}

impl LineItemDraft {
    /// Create an empty draft.
    pub fn new(item_no: u32, decl_no: impl Into<String>) -> Self {
        Self {
            item_no,
            decl_no: decl_no.into(),
            desc_parts: Vec::new(),
            ccc_parts: Vec::new(),
        }
    }
}

/// A fully resolved declaration line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLineItem {
    /// Declaration number.
    pub decl_no: String,

    /// Item number within the declaration.
    pub item_no: u32,

    /// 13-digit product barcode, empty when unresolved.
    pub barcode: String,

    /// Cleaned goods description.
    pub description: String,

    /// Dotted tariff (CCC) code, empty when unresolved.
    pub tariff_code: String,

    /// Import permit number, empty when unresolved.
    pub permit_number: String,

    /// Country of origin span, e.g. `THAILAND TH`.
    pub country: String,

    /// Compliance advisory.
    pub note: String,

    /// File name the item was read from (batch mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

impl ResolvedLineItem {
    /// Attach the provenance file name.
    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }

    /// Fields still empty after resolution.
    pub fn unresolved_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.barcode.is_empty() {
            missing.push("barcode");
        }
        if self.tariff_code.is_empty() {
            missing.push("tariff_code");
        }
        if self.permit_number.is_empty() {
            missing.push("permit_number");
        }
        if self.country.is_empty() {
            missing.push("country");
        }
        missing
    }
}

/// All line items of one declaration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Declaration {
    /// Declaration number read from the first page header.
    pub decl_no: String,

    /// Items in ascending item number order.
    pub items: Vec<ResolvedLineItem>,
}

impl Declaration {
    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the declaration has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the declaration, tagging every item with its source file.
    pub fn into_records(self, source_file: &str) -> Vec<ResolvedLineItem> {
        self.items
            .into_iter()
            .map(|item| item.with_source_file(source_file))
            .collect()
    }
}
