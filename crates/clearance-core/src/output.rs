//! Tabular output of resolved line items.
//!
//! The table is rendered fully in memory and written in one go.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{ClearanceError, Result};
use crate::models::config::{HeaderStyle, OutputConfig};
use crate::models::declaration::ResolvedLineItem;

/// Field names, in output order.
pub const FIELD_COLUMNS: [&str; 8] = [
    "decl_no",
    "item_no",
    "barcode",
    "description",
    "tariff_code",
    "permit_number",
    "country",
    "note",
];

/// Captions of the declaration form, in output order.
pub const LOCALIZED_COLUMNS: [&str; 8] = [
    "報單號碼",
    "項次",
    "貨號/條碼",
    "貨物名稱",
    "稅則號列",
    "許可證號碼",
    "生產國別",
    "申報注意事項",
];

const SOURCE_FILE_FIELD: &str = "source_file";
const SOURCE_FILE_CAPTION: &str = "來源檔案";
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV writer for resolved items.
#[derive(Debug, Clone)]
pub struct TableWriter {
    header_style: HeaderStyle,
    byte_order_mark: bool,
    provenance: bool,
}

impl TableWriter {
    /// Create a writer from output options. Provenance is off.
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            header_style: config.header_style,
            byte_order_mark: config.byte_order_mark,
            provenance: false,
        }
    }

    /// Include the source file column.
    pub fn with_provenance(mut self, provenance: bool) -> Self {
        self.provenance = provenance;
        self
    }

    /// Header row for the configured style.
    pub fn headers(&self) -> Vec<&'static str> {
        let (columns, source) = match self.header_style {
            HeaderStyle::Field => (FIELD_COLUMNS, SOURCE_FILE_FIELD),
            HeaderStyle::Localized => (LOCALIZED_COLUMNS, SOURCE_FILE_CAPTION),
        };

        let mut headers = columns.to_vec();
        if self.provenance {
            headers.push(source);
        }
        headers
    }

    fn record(&self, item: &ResolvedLineItem) -> Vec<String> {
        let mut record = vec![
            item.decl_no.clone(),
            item.item_no.to_string(),
            item.barcode.clone(),
            item.description.clone(),
            item.tariff_code.clone(),
            item.permit_number.clone(),
            item.country.clone(),
            item.note.clone(),
        ];
        if self.provenance {
            record.push(item.source_file.clone().unwrap_or_default());
        }
        record
    }

    /// Render the table into a byte buffer.
    pub fn render(&self, items: &[ResolvedLineItem]) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        if self.byte_order_mark {
            buffer.extend_from_slice(BOM);
        }

        let mut wtr = csv::Writer::from_writer(buffer);
        wtr.write_record(self.headers())?;
        for item in items {
            wtr.write_record(self.record(item))?;
        }

        wtr.into_inner()
            .map_err(|e| ClearanceError::Io(e.into_error()))
    }

    /// Write the table to any writer.
    pub fn write_to<W: Write>(&self, mut writer: W, items: &[ResolvedLineItem]) -> Result<()> {
        writer.write_all(&self.render(items)?)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the table to a file, creating parent directories.
    pub fn write_file(&self, path: &Path, items: &[ResolvedLineItem]) -> Result<()> {
        let data = self.render(items)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item() -> ResolvedLineItem {
        ResolvedLineItem {
            decl_no: "AA/13/123/A1B2".to_string(),
            item_no: 7,
            barcode: "4550480496986".to_string(),
            description: "Oval Melamine Tray, large".to_string(),
            tariff_code: "3924.10.00.90-6".to_string(),
            permit_number: "CI123456789012".to_string(),
            country: "THAILAND TH".to_string(),
            note: "一般查驗 (General Inspection)；塑膠/美耐皿檢驗".to_string(),
            source_file: Some("a.pdf".to_string()),
        }
    }

    fn plain() -> OutputConfig {
        OutputConfig {
            header_style: HeaderStyle::Field,
            byte_order_mark: false,
        }
    }

    #[test]
    fn test_field_headers_without_provenance() {
        let writer = TableWriter::new(&plain());
        let data = String::from_utf8(writer.render(&[item()]).unwrap()).unwrap();
        let mut lines = data.lines();

        assert_eq!(
            lines.next(),
            Some("decl_no,item_no,barcode,description,tariff_code,permit_number,country,note")
        );
        assert_eq!(
            lines.next(),
            Some(
                "AA/13/123/A1B2,7,4550480496986,\"Oval Melamine Tray, large\",3924.10.00.90-6,\
                 CI123456789012,THAILAND TH,一般查驗 (General Inspection)；塑膠/美耐皿檢驗"
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_provenance_column_is_last() {
        let writer = TableWriter::new(&plain()).with_provenance(true);
        assert_eq!(writer.headers().last(), Some(&"source_file"));

        let data = String::from_utf8(writer.render(&[item()]).unwrap()).unwrap();
        assert!(data.lines().nth(1).unwrap().ends_with(",a.pdf"));
    }

    #[test]
    fn test_localized_headers_with_bom() {
        let config = OutputConfig {
            header_style: HeaderStyle::Localized,
            byte_order_mark: true,
        };
        let writer = TableWriter::new(&config).with_provenance(true);
        let data = writer.render(&[]).unwrap();

        assert!(data.starts_with(BOM));
        let text = String::from_utf8(data[BOM.len()..].to_vec()).unwrap();
        assert_eq!(
            text.trim_end(),
            "報單號碼,項次,貨號/條碼,貨物名稱,稅則號列,許可證號碼,生產國別,申報注意事項,來源檔案"
        );
    }

    #[test]
    fn test_write_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("table.csv");
        TableWriter::new(&plain()).write_file(&path, &[item()]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
