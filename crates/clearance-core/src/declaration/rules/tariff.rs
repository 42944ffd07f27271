//! Tariff code and permit number resolution.
//!
//! The tariff/permit column is read as one run of characters. Permit numbers
//! and tariff codes are both long digit runs, so the permit is located and cut
//! out first and only the remainder is searched for tariff digits.

use super::patterns::{NON_ALNUM, PERMIT_NUMBER, TARIFF_DIGITS};

/// Resolved contents of the tariff/permit column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TariffPermit {
    /// Dotted tariff code, empty when unresolved.
    pub tariff_code: String,
    /// Permit number, empty when unresolved.
    pub permit_number: String,
}

/// Concatenate fragments and keep only `A-Z` and `0-9`.
pub fn normalize(parts: &[String]) -> String {
    NON_ALNUM.replace_all(&parts.concat(), "").into_owned()
}

/// Format a 10- or 11-digit tariff run as `9999.99.99.99[-9]`.
pub fn format_tariff(digits: &str) -> Option<String> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let base = match digits.len() {
        10 | 11 => format!(
            "{}.{}.{}.{}",
            &digits[0..4],
            &digits[4..6],
            &digits[6..8],
            &digits[8..10]
        ),
        _ => return None,
    };

    if digits.len() == 11 {
        Some(format!("{}-{}", base, &digits[10..11]))
    } else {
        Some(base)
    }
}

/// Split the tariff/permit fragments into a tariff code and a permit number.
pub fn resolve_tariff_permit(parts: &[String]) -> TariffPermit {
    let mut normalized = normalize(parts);
    let mut result = TariffPermit::default();

    if let Some(m) = PERMIT_NUMBER.find(&normalized) {
        result.permit_number = m.as_str().to_string();
        normalized = normalized.replacen(&result.permit_number, "", 1);
    }

    if let Some(m) = TARIFF_DIGITS.find(&normalized) {
        result.tariff_code = format_tariff(m.as_str()).unwrap_or_default();
    }

    result
}
