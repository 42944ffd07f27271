//! Batch processing command for a directory of declaration files.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use clearance_core::TableWriter;
use clearance_core::batch::{BatchRunner, BatchSummary};
use clearance_core::declaration::DeclarationParser;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Directory scanned for declaration files
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory receiving successfully parsed files
    #[arg(short, long)]
    processed_dir: Option<PathBuf>,

    /// Aggregated CSV output path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Leave parsed files in the input directory
    #[arg(long)]
    keep_files: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = super::load_config(config_path)?;

    if let Some(dir) = args.input_dir {
        config.batch.input_dir = dir;
    }
    if let Some(dir) = args.processed_dir {
        config.batch.processed_dir = dir;
    }

    let parser = DeclarationParser::new(&config)?;
    let runner = BatchRunner::new(parser, &config.batch).with_keep_files(args.keep_files);

    runner.prepare()?;
    let files = runner.discover()?;

    if files.is_empty() {
        println!(
            "{} No files found in {}",
            style("ℹ").blue(),
            runner.input_dir().display()
        );
        return Ok(());
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")?
            .progress_chars("=>-"),
    );

    let mut summary = runner.process(&files, |report| {
        pb.set_message(report.file_name());
        pb.inc(1);
    });

    pb.finish_with_message("Complete");

    if summary.has_output() {
        let output_path = args
            .output
            .unwrap_or_else(|| default_output_path(&config.batch.output_dir));

        TableWriter::new(&config.output)
            .with_provenance(true)
            .write_file(&output_path, &summary.records)?;

        debug!("Wrote {} records", summary.records.len());
        println!(
            "{} {} items written to {}",
            style("✓").green(),
            summary.records.len(),
            output_path.display()
        );
    }

    // inputs move only after their records are on disk
    runner.commit(&mut summary);

    print_summary(&summary, start);

    Ok(())
}

/// `<output_dir>/declarations_<timestamp>.csv`
fn default_output_path(output_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    output_dir.join(format!("declarations_{}.csv", timestamp))
}

fn print_summary(summary: &BatchSummary, start: Instant) {
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        summary.total(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(summary.succeeded.len()).green(),
        style(summary.failed.len()).red()
    );

    if !summary.failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (path, reason) in &summary.failed {
            println!("  - {}: {}", path.display(), reason);
        }
    }

    if !summary.unmoved.is_empty() {
        println!();
        println!("{}", style("Not moved (will be parsed again):").yellow());
        for (path, reason) in &summary.unmoved {
            println!("  - {}: {}", path.display(), reason);
        }
    }
}
