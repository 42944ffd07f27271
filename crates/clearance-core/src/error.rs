//! Error types for the clearance-core library.

use thiserror::Error;

/// Main error type for the clearance library.
#[derive(Error, Debug)]
pub enum ClearanceError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Line item extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output table error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract positioned text from the PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to declaration line item extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No line items could be reconstructed from the document.
    #[error("no line items found")]
    NoItems,

    /// An anchor token looked like an item number but did not parse.
    #[error("invalid item number: {0}")]
    InvalidItemNumber(String),
}

/// Result type for the clearance library.
pub type Result<T> = std::result::Result<T, ClearanceError>;
