//! Declaration line item extraction module.

mod parser;
pub mod rules;

pub use parser::{DeclarationParser, ExtractionResult};

use std::path::Path;

use crate::error::Result;

/// Trait for declaration document parsing.
pub trait DocumentParser {
    /// Parse a declaration document from disk.
    fn parse_file(&self, path: &Path) -> Result<ExtractionResult>;
}
