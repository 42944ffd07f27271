//! Declaration number extraction from the first page header.

use super::patterns::DECLARATION_NUMBER;

/// Placeholder used when the header carries no declaration number.
pub const UNKNOWN_DECLARATION: &str = "Unknown";

/// Extract the declaration number, with whitespace removed and `//` collapsed.
pub fn extract_declaration_number(text: &str) -> Option<String> {
    let caps = DECLARATION_NUMBER.captures(text)?;
    let compact: String = caps[1].chars().filter(|c| !c.is_whitespace()).collect();
    Some(compact.replace("//", "/"))
}
