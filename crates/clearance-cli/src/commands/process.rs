//! Process command - extract line items from a single declaration file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use clearance_core::TableWriter;
use clearance_core::declaration::{DeclarationParser, DocumentParser};
use clearance_core::models::config::ClearanceConfig;
use clearance_core::models::declaration::Declaration;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print data-quality warnings
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !config.batch.extensions.iter().any(|e| e.eq_ignore_ascii_case(&extension)) {
        anyhow::bail!("Unsupported file format: {}", extension);
    }

    info!("Processing file: {}", args.input.display());

    let parser = DeclarationParser::new(&config)?;
    let result = parser.parse_file(&args.input)?;

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    let output = format_declaration(&result.declaration, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} items written to {}",
            style("✓").green(),
            result.declaration.len(),
            output_path.display()
        );
    } else {
        print!("{}", String::from_utf8_lossy(&output));
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_declaration(
    declaration: &Declaration,
    format: OutputFormat,
    config: &ClearanceConfig,
) -> anyhow::Result<Vec<u8>> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_vec_pretty(declaration)?;
            json.push(b'\n');
            Ok(json)
        }
        OutputFormat::Csv => Ok(TableWriter::new(&config.output).render(&declaration.items)?),
        OutputFormat::Text => Ok(format_text(declaration).into_bytes()),
    }
}

fn format_text(declaration: &Declaration) -> String {
    let mut output = String::new();

    output.push_str(&format!("Declaration: {}\n", declaration.decl_no));
    output.push_str(&format!("Items: {}\n", declaration.len()));

    for item in &declaration.items {
        output.push('\n');
        output.push_str(&format!("#{} {}\n", item.item_no, item.description));
        if !item.barcode.is_empty() {
            output.push_str(&format!("  Barcode: {}\n", item.barcode));
        }
        output.push_str(&format!("  Tariff:  {}\n", or_dash(&item.tariff_code)));
        output.push_str(&format!("  Permit:  {}\n", or_dash(&item.permit_number)));
        output.push_str(&format!("  Origin:  {}\n", or_dash(&item.country)));
        if !item.note.is_empty() {
            output.push_str(&format!("  Note:    {}\n", item.note));
        }
    }

    output
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
