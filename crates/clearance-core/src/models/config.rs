//! Configuration structures for the extraction pipeline.
//!
//! Every coordinate threshold and keyword table is calibrated against one
//! printed declaration form. Nothing here is derived from the document being
//! parsed, so a different print template needs a different configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the clearance pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearanceConfig {
    /// Page geometry thresholds.
    pub layout: LayoutConfig,

    /// Keyword tables and compliance rules.
    pub rules: RuleConfig,

    /// Batch directories.
    pub batch: BatchConfig,

    /// Output table options.
    pub output: OutputConfig,
}

/// Coordinate thresholds for the declaration form, in PDF layout units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Left edge of the description column.
    pub desc_min_x: f64,

    /// Boundary between the description column and the tariff/permit column.
    /// Anchors must start strictly left of it.
    pub split_x: f64,

    /// Start of the right-hand metadata column, which is discarded.
    pub noise_start_x: f64,

    /// Distance from the page top below which a leading carry-over zone is emitted.
    pub top_epsilon: f64,

    /// Height of the coarse row bucket used to order words within a zone.
    pub row_bucket: f64,

    /// Horizontal gap that splits two glyphs into separate words.
    pub word_gap: f64,

    /// Vertical drift tolerated inside one text line.
    pub line_tolerance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            desc_min_x: 10.0,
            split_x: 202.0,
            noise_start_x: 315.0,
            top_epsilon: 10.0,
            row_bucket: 2.0,
            word_gap: 3.0,
            line_tolerance: 3.0,
        }
    }
}

/// Permit prefix rule. The first matching rule is the only permit note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitRule {
    /// Permit number prefix.
    pub prefix: String,
    /// Advisory text.
    pub note: String,
}

/// Tariff prefix rule. Every matching rule contributes its note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffRule {
    /// Digit-only tariff code prefixes; any one of them triggers the note.
    pub prefixes: Vec<String>,
    /// Advisory text.
    pub note: String,
}

/// Keyword tables and compliance rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Header, footer and label strings treated as page furniture.
    pub noise_keywords: Vec<String>,

    /// Two-letter origin codes accepted by the country marker search.
    pub country_codes: Vec<String>,

    /// Unit and incoterm tokens stripped from descriptions.
    pub description_noise_words: Vec<String>,

    /// Permit notes, evaluated in order.
    pub permit_notes: Vec<PermitRule>,

    /// Tariff notes, evaluated in order.
    pub tariff_notes: Vec<TariffRule>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn permit(prefix: &str, note: &str) -> PermitRule {
    PermitRule {
        prefix: prefix.to_string(),
        note: note.to_string(),
    }
}

fn tariff(prefixes: &[&str], note: &str) -> TariffRule {
    TariffRule {
        prefixes: strings(prefixes),
        note: note.to_string(),
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            noise_keywords: strings(&[
                "報單號碼", "主提單號碼", "生產國別", "輸出入許可文件號碼",
                "輸出入貨品分類號列", "納稅辦法", "貨物名稱", "品牌", "規格",
                "數量", "單位", "淨重", "單價", "幣別", "FCL/FCL", "包裝說明",
                "TOTAL", "PAGE", "TERM OF", "進口報單", "項 次", "標記",
                "貨櫃號碼", "其他申報事項", "長期委任", "未投保", "WHSU", "0CTN",
            ]),
            country_codes: strings(&[
                "TH", "CN", "JP", "US", "VN", "TW", "KR", "ID", "MY", "DE", "IT", "FR", "GB",
            ]),
            description_noise_words: strings(&["FOB", "JPY", "KGM", "PCE"]),
            permit_notes: vec![
                permit("IFB", "食品容器 (Food Contact) - 需檢驗"),
                permit("CI", "一般查驗 (General Inspection)"),
                permit("DH", "可能為免驗或核備代碼"),
            ],
            tariff_notes: vec![
                tariff(&["9503"], "玩具 (Toys) - 需 BSMI 檢驗"),
                tariff(&["3924"], "塑膠/美耐皿檢驗"),
                tariff(&["940"], "燈具/家具 - 注意檢驗"),
                tariff(&["691"], "陶瓷檢驗"),
                tariff(&["9603"], "刷具 - 注意動物毛/植物毛"),
                tariff(&["630", "570"], "紡織品 - 注意成分標示"),
                tariff(&["910"], "鐘錶/計時器 - 注意電池規定"),
            ],
        }
    }
}

/// Batch directories and file selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory scanned (non-recursively) for input documents.
    pub input_dir: PathBuf,

    /// Directory receiving successfully parsed documents.
    pub processed_dir: PathBuf,

    /// Directory receiving the aggregated table.
    pub output_dir: PathBuf,

    /// File extensions accepted as input, without the dot.
    pub extensions: Vec<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("inpdf"),
            processed_dir: PathBuf::from("inpdf").join("processed"),
            output_dir: PathBuf::from("."),
            extensions: strings(&["pdf"]),
        }
    }
}

/// Column caption style of the output table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderStyle {
    /// snake_case field names.
    #[default]
    Field,
    /// The declaration form's own captions.
    Localized,
}

/// Output table options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Column caption style.
    pub header_style: HeaderStyle,

    /// Prefix the table with a UTF-8 byte-order mark.
    pub byte_order_mark: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            header_style: HeaderStyle::Field,
            byte_order_mark: true,
        }
    }
}

impl ClearanceConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
