//! Sequential conversion of every statement in a directory.
//!
//! Each file is converted in isolation: a fatal error for one statement is
//! recorded and counted, then the batch moves on. Outcomes are reported to an
//! [`OutcomeSink`] handed to the [`BatchConverter`] at construction.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{error, info, instrument, warn};

use crate::crdb::zoho::convert::{self, OUTPUT_EXTENSION, Outcome};
use crate::crdb::zoho::error::{ConvertError, Result};

/// Extension of the statements picked up from the source directory.
pub const INPUT_EXTENSION: &str = "xls";

/// Log file name used when none is configured.
pub const DEFAULT_LOG_FILE: &str = "conversion.log";

/// Directories and flags for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    /// Overwrite outputs that already exist.
    pub force: bool,
}

impl BatchOptions {
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            force: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Output path for a statement: its stem under the destination directory.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or(input.as_os_str());
        let mut name = stem.to_os_string();
        name.push(".");
        name.push(OUTPUT_EXTENSION);
        self.dest_dir.join(name)
    }

    /// Default log location under the destination directory.
    pub fn default_log_path(&self) -> PathBuf {
        self.dest_dir.join(DEFAULT_LOG_FILE)
    }
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Converted { output: PathBuf, records: usize },
    Skipped { output: PathBuf },
    Failed { error: String },
}

/// A timestamped outcome for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub input: PathBuf,
    pub outcome: FileOutcome,
}

impl LogEntry {
    pub fn new(input: impl Into<PathBuf>, outcome: FileOutcome) -> Self {
        Self {
            timestamp: Local::now(),
            input: input.into(),
            outcome,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timestamp = self.timestamp.to_rfc3339();
        let input = self.input.display();
        match &self.outcome {
            FileOutcome::Converted { output, records } => write!(
                f,
                "{timestamp} CONVERTED {input} -> {} ({records} records)",
                output.display()
            ),
            FileOutcome::Skipped { output } => write!(
                f,
                "{timestamp} SKIPPED {input} (output exists: {})",
                output.display()
            ),
            FileOutcome::Failed { error } => write!(f, "{timestamp} FAILED {input}: {error}"),
        }
    }
}

/// Receives the outcome of every file processed by a batch run.
pub trait OutcomeSink {
    fn record(&mut self, entry: &LogEntry) -> Result<()>;
}

impl OutcomeSink for Vec<LogEntry> {
    fn record(&mut self, entry: &LogEntry) -> Result<()> {
        self.push(entry.clone());
        Ok(())
    }
}

/// Appends outcomes to a log file and mirrors them to the tracing output.
#[derive(Debug)]
pub struct LogFileSink {
    path: PathBuf,
    file: File,
}

impl LogFileSink {
    /// Opens `path` for appending, creating it and its parent directories.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutcomeSink for LogFileSink {
    fn record(&mut self, entry: &LogEntry) -> Result<()> {
        writeln!(self.file, "{entry}")?;
        let input = entry.input.display();
        match &entry.outcome {
            FileOutcome::Converted { output, records } => {
                info!(%input, output = %output.display(), records, "converted")
            }
            FileOutcome::Skipped { output } => {
                warn!(%input, output = %output.display(), "skipped, output exists")
            }
            FileOutcome::Failed { error } => error!(%input, %error, "conversion failed"),
        }
        Ok(())
    }
}

/// Counters reported at the end of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Converted={}, Skipped={}, Failed={}",
            self.converted, self.skipped, self.failed
        )
    }
}

/// Drives a batch run, reporting each file to the injected sink.
pub struct BatchConverter<S> {
    options: BatchOptions,
    sink: S,
}

impl<S: OutcomeSink> BatchConverter<S> {
    pub fn new(options: BatchOptions, sink: S) -> Self {
        Self { options, sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Converts every statement of the source directory in file name order.
    ///
    /// Only setup problems (unreadable source directory, uncreatable
    /// destination, sink failures) abort the run.
    #[instrument(
        level = "info",
        skip_all,
        fields(source = %self.options.source_dir.display(), dest = %self.options.dest_dir.display())
    )]
    pub fn run(&mut self) -> Result<BatchSummary> {
        let inputs = list_inputs(&self.options.source_dir)?;
        fs::create_dir_all(&self.options.dest_dir)?;
        info!(files = inputs.len(), "starting batch");

        let mut summary = BatchSummary::default();
        for input in inputs {
            let outcome = self.process(&input);
            match outcome {
                FileOutcome::Converted { .. } => summary.converted += 1,
                FileOutcome::Skipped { .. } => summary.skipped += 1,
                FileOutcome::Failed { .. } => summary.failed += 1,
            }
            self.sink.record(&LogEntry::new(input, outcome))?;
        }

        info!(%summary, "batch finished");
        Ok(summary)
    }

    fn process(&self, input: &Path) -> FileOutcome {
        let output = self.options.output_path(input);
        match convert::convert_file(input, &output, self.options.force) {
            Ok(Outcome::Converted { records }) => FileOutcome::Converted { output, records },
            Ok(Outcome::Skipped) => FileOutcome::Skipped { output },
            Err(error) => FileOutcome::Failed {
                error: error.to_string(),
            },
        }
    }
}

/// Lists the statement files of `dir`, sorted by file name.
pub fn list_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ConvertError::NotADirectory(dir.to_path_buf()));
    }
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_statement = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case(INPUT_EXTENSION));
        if path.is_file() && is_statement {
            inputs.push(path);
        }
    }
    inputs.sort_by(|lhs, rhs| lhs.file_name().cmp(&rhs.file_name()));
    Ok(inputs)
}
