//! Batch processing over a directory of declaration files.
//!
//! Every file ends in a [`FileOutcome`]. Outcomes are collected first and
//! partitioned afterwards, so one file's failure never touches another
//! file's records. Succeeded files leave the input directory only after the
//! aggregated table has been written.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use glob::{MatchOptions, Pattern};
use tracing::{debug, info, warn};

use crate::declaration::DocumentParser;
use crate::error::{ClearanceError, Result};
use crate::models::config::BatchConfig;
use crate::models::declaration::ResolvedLineItem;

/// Terminal state of one file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Parsed into at least one item; records carry their source file.
    Succeeded(Vec<ResolvedLineItem>),
    /// Parsing failed or produced nothing.
    Failed(String),
}

impl FileOutcome {
    /// Check if the file succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Succeeded(_))
    }
}

/// Outcome of one file together with its path.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// Input file.
    pub path: PathBuf,
    /// Parse outcome.
    pub outcome: FileOutcome,
    /// Parse time in milliseconds.
    pub processing_time_ms: u64,
}

impl FileReport {
    /// File name used as provenance.
    pub fn file_name(&self) -> String {
        file_name(&self.path)
    }
}

/// Aggregate of a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// All records of succeeded files, in processing order.
    pub records: Vec<ResolvedLineItem>,
    /// Files that succeeded.
    pub succeeded: Vec<PathBuf>,
    /// Files that failed, with their reason.
    pub failed: Vec<(PathBuf, String)>,
    /// Succeeded files that could not be moved to the processed directory.
    pub unmoved: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    /// Total number of files seen.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// An output table is only produced when something succeeded.
    pub fn has_output(&self) -> bool {
        !self.succeeded.is_empty()
    }
}

/// Split reports into successes and failures without touching the filesystem.
pub fn partition(reports: Vec<FileReport>) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for report in reports {
        match report.outcome {
            FileOutcome::Succeeded(records) => {
                summary.records.extend(records);
                summary.succeeded.push(report.path);
            }
            FileOutcome::Failed(reason) => {
                summary.failed.push((report.path, reason));
            }
        }
    }

    summary
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Move a file into `dest_dir`, replacing a same-named file there.
pub fn move_to_dir(path: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| ClearanceError::Config(format!("not a file: {}", path.display())))?;
    let dest = dest_dir.join(name);

    if fs::rename(path, &dest).is_err() {
        // rename fails across filesystems; copy truncates an existing target
        fs::copy(path, &dest)?;
        fs::remove_file(path)?;
    }

    Ok(dest)
}

/// Sequential batch orchestrator.
pub struct BatchRunner<P> {
    parser: P,
    input_dir: PathBuf,
    processed_dir: PathBuf,
    extensions: Vec<String>,
    keep_files: bool,
}

impl<P: DocumentParser> BatchRunner<P> {
    /// Create a runner from batch settings.
    pub fn new(parser: P, config: &BatchConfig) -> Self {
        Self {
            parser,
            input_dir: config.input_dir.clone(),
            processed_dir: config.processed_dir.clone(),
            extensions: config.extensions.clone(),
            keep_files: false,
        }
    }

    /// Leave succeeded files in the input directory.
    pub fn with_keep_files(mut self, keep: bool) -> Self {
        self.keep_files = keep;
        self
    }

    /// Input directory.
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Processed-files directory.
    pub fn processed_dir(&self) -> &Path {
        &self.processed_dir
    }

    /// Create the input and processed directories if absent.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.input_dir)?;
        fs::create_dir_all(&self.processed_dir)?;
        Ok(())
    }

    /// Files directly inside the input directory with a known extension,
    /// sorted by path.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };
        let base = Pattern::escape(&self.input_dir.to_string_lossy());

        let mut files = Vec::new();
        for ext in &self.extensions {
            let ext = ext.trim_start_matches('.');
            if ext.is_empty() {
                continue;
            }
            let pattern = format!("{}/*.{}", base, Pattern::escape(ext));
            let entries = glob::glob_with(&pattern, options)
                .map_err(|e| ClearanceError::Config(format!("invalid pattern {}: {}", pattern, e)))?;
            files.extend(entries.filter_map(|r| r.ok()).filter(|p| p.is_file()));
        }

        files.sort();
        files.dedup();
        debug!("Discovered {} files in {}", files.len(), self.input_dir.display());
        Ok(files)
    }

    /// Parse one file into a report. Never fails; errors become `Failed`.
    pub fn process_file(&self, path: &Path) -> FileReport {
        let start = Instant::now();
        let source = file_name(path);

        let outcome = match self.parser.parse_file(path) {
            Ok(result) if result.declaration.is_empty() => {
                FileOutcome::Failed("no line items found".to_string())
            }
            Ok(result) => FileOutcome::Succeeded(result.declaration.into_records(&source)),
            Err(e) => FileOutcome::Failed(e.to_string()),
        };

        if let FileOutcome::Failed(reason) = &outcome {
            warn!("Failed to process {}: {}", source, reason);
        }

        FileReport {
            path: path.to_path_buf(),
            outcome,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Parse the given files in order. Nothing is moved; see [`Self::commit`].
    /// `on_file` is called after each file.
    pub fn process<F>(&self, files: &[PathBuf], mut on_file: F) -> BatchSummary
    where
        F: FnMut(&FileReport),
    {
        let mut reports = Vec::with_capacity(files.len());

        for path in files {
            let report = self.process_file(path);
            on_file(&report);
            reports.push(report);
        }

        let summary = partition(reports);
        info!(
            "Batch complete: {} succeeded, {} failed, {} records",
            summary.succeeded.len(),
            summary.failed.len(),
            summary.records.len()
        );
        summary
    }

    /// Move succeeded files to the processed directory.
    ///
    /// Call only once their records are safely written. Files that cannot be
    /// moved stay in the input directory and are listed in `unmoved`.
    pub fn commit(&self, summary: &mut BatchSummary) {
        if self.keep_files {
            return;
        }

        for path in &summary.succeeded {
            match move_to_dir(path, &self.processed_dir) {
                Ok(dest) => debug!("Moved {} to {}", path.display(), dest.display()),
                Err(e) => {
                    warn!("Could not move {}: {}", path.display(), e);
                    summary.unmoved.push((path.clone(), e.to_string()));
                }
            }
        }
    }

    /// Prepare directories, discover and process every file, hand the summary
    /// to `write` when anything succeeded, then commit the moves.
    ///
    /// A `write` error is returned before any file is moved.
    pub fn run<F, W>(&self, on_file: F, write: W) -> Result<BatchSummary>
    where
        F: FnMut(&FileReport),
        W: FnOnce(&BatchSummary) -> Result<()>,
    {
        self.prepare()?;
        let files = self.discover()?;
        let mut summary = self.process(&files, on_file);

        if summary.has_output() {
            write(&summary)?;
        }

        self.commit(&mut summary);
        Ok(summary)
    }
}
