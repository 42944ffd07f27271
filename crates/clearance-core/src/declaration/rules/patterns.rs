//! Common regex patterns for declaration field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Declaration number in the first page header, e.g. "AA/ 12/345/X1"
    pub static ref DECLARATION_NUMBER: Regex = Regex::new(
        r"([A-Z]{2}/[\s\d/]+/[A-Z0-9]+)"
    ).unwrap();

    // Everything that is not an uppercase ASCII letter or digit
    pub static ref NON_ALNUM: Regex = Regex::new(r"[^A-Z0-9]").unwrap();

    // Import permit: CI + 12 digits, or IFB + 11 letters/digits
    pub static ref PERMIT_NUMBER: Regex = Regex::new(
        r"CI[0-9]{12}|IFB[A-Z0-9]{11}"
    ).unwrap();

    // Tariff code digits, with or without the check digit
    pub static ref TARIFF_DIGITS: Regex = Regex::new(r"[0-9]{10,11}").unwrap();

    // Uppercase words followed by a standalone two-letter origin code
    pub static ref COUNTRY_MARKER: Regex = Regex::new(
        r"\b([A-Z]+(?:\s+[A-Z]+)*)\s+([A-Z]{2})\b"
    ).unwrap();

    // EAN-13 barcode token
    pub static ref BARCODE: Regex = Regex::new(r"\b(\d{13})\b").unwrap();

    // Residual numbering at the start of a description
    pub static ref LEADING_NUMBERING: Regex = Regex::new(r"^[\d.\-\s]+").unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}
