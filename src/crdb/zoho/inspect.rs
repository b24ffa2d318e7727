//! Diagnostic view of how the locator sees a statement.

use std::fmt;
use std::path::Path;

use crate::crdb::zoho::error::Result;
use crate::crdb::zoho::io::xls_read;
use crate::crdb::zoho::locate;
use crate::crdb::zoho::model::RawGrid;
use crate::crdb::zoho::normalize::{normalize_header, pad_header};

/// Data rows shown under a located header.
pub const HEADER_PREVIEW_ROWS: usize = 15;
/// Raw rows shown when no header was located.
pub const RAW_PREVIEW_ROWS: usize = 60;

/// Shape, header candidates and a row preview of one worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionReport {
    pub rows: usize,
    pub columns: usize,
    /// Every header candidate in the scan window, in row order.
    pub candidates: Vec<usize>,
    /// First candidate with its normalized, padded header.
    pub header: Option<(usize, Vec<String>)>,
    /// Rows under the chosen header, or the leading raw rows without one.
    pub preview: Vec<Vec<String>>,
}

/// Reads a workbook and inspects its first worksheet.
pub fn inspect_file(path: &Path) -> Result<InspectionReport> {
    let grid = xls_read::read_grid(path)?;
    Ok(inspect_grid(&grid))
}

pub fn inspect_grid(grid: &RawGrid) -> InspectionReport {
    let candidates = locate::candidate_rows(grid);
    let rows = grid.rows();
    let (header, preview) = match candidates.first() {
        Some(&index) => {
            let header = pad_header(normalize_header(rows[index].as_slice()), grid.width());
            let preview = rows[index + 1..]
                .iter()
                .take(HEADER_PREVIEW_ROWS)
                .cloned()
                .collect();
            (Some((index, header)), preview)
        }
        None => (None, rows.iter().take(RAW_PREVIEW_ROWS).cloned().collect()),
    };
    InspectionReport {
        rows: grid.len(),
        columns: grid.width(),
        candidates,
        header,
        preview,
    }
}

impl fmt::Display for InspectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape: ({}, {})", self.rows, self.columns)?;
        writeln!(f, "Candidate header rows: {:?}", self.candidates)?;
        match &self.header {
            Some((index, header)) => {
                writeln!(f, "Chosen header idx: {index}")?;
                writeln!(f, "{}", header.join(" | "))?;
                writeln!(f, "First {HEADER_PREVIEW_ROWS} rows under header:")?;
            }
            None => {
                writeln!(
                    f,
                    "No header candidates found; showing rows 0..{RAW_PREVIEW_ROWS}:"
                )?;
            }
        }
        for row in &self.preview {
            writeln!(f, "{}", row.join(" | "))?;
        }
        Ok(())
    }
}
