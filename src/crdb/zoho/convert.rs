use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::crdb::zoho::error::{ConvertError, Result};
use crate::crdb::zoho::io::{csv_write, xls_read};
use crate::crdb::zoho::locate;
use crate::crdb::zoho::model::{OutputRecord, RawGrid};
use crate::crdb::zoho::normalize;

/// Extension given to converted statements.
pub const OUTPUT_EXTENSION: &str = "csv";

/// Result of a single-file conversion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The statement was converted and `records` rows were written.
    Converted { records: usize },
    /// The output already existed and overwriting was not requested.
    Skipped,
}

/// Output path used when none is given: the input path with a `.csv` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// Locates the transaction table in `grid` and normalizes the rows under it.
#[instrument(level = "debug", skip_all, fields(rows = grid.len()))]
pub fn convert_grid(grid: &RawGrid) -> Result<Vec<OutputRecord>> {
    let header_row = locate::find_header_row(grid).ok_or(ConvertError::HeaderNotFound {
        scanned: locate::scan_limit(grid),
    })?;
    let rows = grid.rows();
    let header = &rows[header_row];
    let data = &rows[header_row + 1..];
    debug!(header_row, data_rows = data.len(), "sliced transaction table");
    normalize::normalize_rows(header.as_slice(), data)
}

/// Converts a statement workbook into a ledger import file.
///
/// Returns the number of records written.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn convert(input: &Path, output: &Path) -> Result<usize> {
    let grid = xls_read::read_grid(input)?;
    let records = convert_grid(&grid)?;
    csv_write::write_records(output, &records)?;
    info!(retained = records.len(), "wrote ledger import file");
    Ok(records.len())
}

/// Converts `input` unless `output` already exists and `force` is not set.
pub fn convert_file(input: &Path, output: &Path, force: bool) -> Result<Outcome> {
    if !input.exists() {
        return Err(ConvertError::MissingInput(input.to_path_buf()));
    }
    if output.exists() && !force {
        info!(output = %output.display(), "output exists, skipping");
        return Ok(Outcome::Skipped);
    }
    let records = convert(input, output)?;
    Ok(Outcome::Converted { records })
}
