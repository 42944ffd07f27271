//! Rule-based field resolvers for declaration line items.

pub mod compliance;
pub mod description;
pub mod header;
pub mod patterns;
pub mod tariff;

pub use compliance::{ComplianceRules, NOTE_SEPARATOR};
pub use description::{DescriptionFields, DescriptionResolver, extract_barcode};
pub use header::{UNKNOWN_DECLARATION, extract_declaration_number};
pub use tariff::{TariffPermit, format_tariff, normalize, resolve_tariff_permit};
