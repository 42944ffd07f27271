//! Compliance advisory notes derived from tariff code and permit number.

use crate::models::config::{PermitRule, RuleConfig, TariffRule};

/// Separator between notes.
pub const NOTE_SEPARATOR: &str = "；";

/// Ordered permit and tariff rule tables.
///
/// At most one permit note applies (first matching prefix). Every matching
/// tariff rule contributes its note, in table order, after the permit note.
#[derive(Debug, Clone)]
pub struct ComplianceRules {
    permit_rules: Vec<PermitRule>,
    tariff_rules: Vec<TariffRule>,
}

impl ComplianceRules {
    /// Create rule tables from configuration.
    pub fn new(rules: &RuleConfig) -> Self {
        Self {
            permit_rules: rules.permit_notes.clone(),
            tariff_rules: rules.tariff_notes.clone(),
        }
    }

    /// All notes matching the given fields, in output order.
    pub fn notes(&self, tariff_code: &str, permit_number: &str) -> Vec<&str> {
        let mut notes = Vec::new();

        if let Some(rule) = self
            .permit_rules
            .iter()
            .find(|r| !r.prefix.is_empty() && permit_number.starts_with(r.prefix.as_str()))
        {
            notes.push(rule.note.as_str());
        }

        let digits: String = tariff_code.chars().filter(|c| *c != '.' && *c != '-').collect();
        for rule in &self.tariff_rules {
            let matched = rule
                .prefixes
                .iter()
                .any(|p| !p.is_empty() && digits.starts_with(p.as_str()));
            if matched {
                notes.push(rule.note.as_str());
            }
        }

        notes
    }

    /// Notes joined into a single advisory string; empty when nothing applies.
    pub fn note(&self, tariff_code: &str, permit_number: &str) -> String {
        self.notes(tariff_code, permit_number).join(NOTE_SEPARATOR)
    }
}
