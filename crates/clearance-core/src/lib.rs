//! Core library for customs declaration PDF processing.
//!
//! This crate provides:
//! - Positioned word extraction from PDF pages
//! - Layout analysis: noise filtering, item anchors, vertical zones, columns
//! - Line item field resolution (tariff code, permit, origin, barcode)
//! - Compliance notes derived from tariff and permit
//! - Batch processing over a directory and CSV output

pub mod batch;
pub mod declaration;
pub mod error;
pub mod layout;
pub mod models;
pub mod output;
pub mod pdf;

pub use batch::{BatchRunner, BatchSummary, FileOutcome, FileReport, partition};
pub use declaration::{DeclarationParser, DocumentParser, ExtractionResult};
pub use error::{ClearanceError, Result};
pub use models::config::ClearanceConfig;
pub use models::declaration::{Declaration, LineItemDraft, ResolvedLineItem};
pub use output::TableWriter;
pub use pdf::{PageLayout, PdfExtractor, PdfProcessor, Word};
