//! Description, country of origin and barcode resolution.

use std::collections::HashSet;

use regex::Regex;

use super::patterns::{BARCODE, COUNTRY_MARKER, LEADING_NUMBERING, WHITESPACE};
use crate::error::{ClearanceError, Result};
use crate::models::config::RuleConfig;

/// Resolved contents of the description column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionFields {
    /// Cleaned goods description.
    pub description: String,
    /// Country marker span, e.g. `THAILAND TH`.
    pub country: String,
    /// 13-digit barcode.
    pub barcode: String,
}

/// Extract the first standalone 13-digit token.
pub fn extract_barcode(text: &str) -> Option<String> {
    BARCODE.captures(text).map(|caps| caps[1].to_string())
}

/// Splits description fragments into description, origin and barcode.
#[derive(Debug, Clone)]
pub struct DescriptionResolver {
    country_codes: HashSet<String>,
    noise_words: Option<Regex>,
}

impl DescriptionResolver {
    /// Build a resolver from the origin whitelist and unit/incoterm words.
    pub fn new(rules: &RuleConfig) -> Result<Self> {
        let words: Vec<String> = rules
            .description_noise_words
            .iter()
            .filter(|w| !w.trim().is_empty())
            .map(|w| regex::escape(w.trim()))
            .collect();

        let noise_words = if words.is_empty() {
            None
        } else {
            let pattern = format!(r"\b(?:{})\b", words.join("|"));
            Some(Regex::new(&pattern).map_err(|e| {
                ClearanceError::Config(format!("invalid description noise words: {}", e))
            })?)
        };

        Ok(Self {
            country_codes: rules.country_codes.iter().cloned().collect(),
            noise_words,
        })
    }

    /// Find the country marker. Only the first candidate is considered, and it
    /// counts only when its code is whitelisted.
    pub fn find_country<'t>(&self, text: &'t str) -> Option<&'t str> {
        let caps = COUNTRY_MARKER.captures(text)?;
        let code = caps.get(2)?.as_str();
        if self.country_codes.contains(code) {
            caps.get(0).map(|m| m.as_str())
        } else {
            None
        }
    }

    /// Resolve joined fragments.
    pub fn resolve(&self, parts: &[String]) -> DescriptionFields {
        let joined = parts.join(" ");

        let barcode = extract_barcode(&joined).unwrap_or_default();

        let mut country = String::new();
        let mut working = joined.clone();
        if let Some(found) = self.find_country(&joined) {
            country = found.to_string();
            working = working.replacen(found, " ", 1);
        }

        let description = self.clean(&working);

        DescriptionFields {
            description,
            country,
            barcode,
        }
    }

    fn clean(&self, text: &str) -> String {
        let mut text = BARCODE.replace_all(text, " ").into_owned();
        if let Some(noise) = &self.noise_words {
            text = noise.replace_all(&text, " ").into_owned();
        }
        let text = LEADING_NUMBERING.replace(text.trim(), "");
        WHITESPACE.replace_all(&text, " ").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolver() -> DescriptionResolver {
        DescriptionResolver::new(&RuleConfig::default()).unwrap()
    }

    fn parts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unknown_code_leaves_description() {
        let fields = resolver().resolve(&parts(&["ACME CORP XX"]));
        assert_eq!(fields.country, "");
        assert_eq!(fields.description, "ACME CORP XX");
    }

    #[test]
    fn test_whitelisted_country_is_extracted() {
        let fields = resolver().resolve(&parts(&["THAILAND TH"]));
        assert_eq!(fields.country, "THAILAND TH");
        assert_eq!(fields.description, "");
    }

    #[test]
    fn test_full_description_cleanup() {
        let fields = resolver().resolve(&parts(&[
            "1-2.",
            "Oval Melamine Tray",
            "4550480496986",
            "THAILAND TH",
            "FOB",
            "12 PCE",
        ]));
        assert_eq!(
            fields,
            DescriptionFields {
                description: "Oval Melamine Tray 12".to_string(),
                country: "THAILAND TH".to_string(),
                barcode: "4550480496986".to_string(),
            }
        );
    }

    #[test]
    fn test_country_removed_once() {
        let fields = resolver().resolve(&parts(&["Tray", "JAPAN JP", "set JAPAN JP"]));
        assert_eq!(fields.country, "JAPAN JP");
        assert_eq!(fields.description, "Tray set JAPAN JP");
    }

    #[test]
    fn test_barcode_read_from_original_text() {
        let fields = resolver().resolve(&parts(&["Cup 4549892963605 CHINA CN"]));
        assert_eq!(fields.barcode, "4549892963605");
        assert_eq!(fields.country, "CHINA CN");
        assert_eq!(fields.description, "Cup");
    }

    #[test]
    fn test_barcode_must_stand_alone() {
        assert_eq!(extract_barcode("45498929636051"), None);
        assert_eq!(extract_barcode("x 4549892963605 y").as_deref(), Some("4549892963605"));
    }

    #[test]
    fn test_empty_noise_list() {
        let mut rules = RuleConfig::default();
        rules.description_noise_words.clear();
        let resolver = DescriptionResolver::new(&rules).unwrap();
        let fields = resolver.resolve(&parts(&["Tray FOB"]));
        assert_eq!(fields.description, "Tray FOB");
    }
}
