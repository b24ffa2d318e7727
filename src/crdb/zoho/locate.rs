//! Locates the transaction table header inside a loosely structured sheet.
//!
//! Statement exports put account metadata, balances and banners above the
//! transaction table, so the header row position varies from file to file.
//! The locator scans a bounded window of rows and returns the first row whose
//! non-empty cells mention every header keyword of one of the accepted
//! keyword sets.

use tracing::{debug, instrument};

use crate::crdb::zoho::model::RawGrid;

/// Number of leading rows searched for the header.
pub const MAX_SCAN_ROWS: usize = 500;

/// Accepted header keyword sets. A row qualifies when every keyword of at
/// least one set is contained in some cell; one cell may satisfy several
/// keywords.
pub const HEADER_KEYWORD_SETS: [&[&str]; 2] = [
    &["posting", "date", "details", "value", "debit", "credit"],
    &["posting date", "details", "value date", "debit", "credit"],
];

/// Returns the index of the first header row within the scan window.
#[instrument(level = "debug", skip_all, fields(rows = grid.len()))]
pub fn find_header_row(grid: &RawGrid) -> Option<usize> {
    let found = scan_window(grid).find(|(_, cells)| is_header_candidate(cells));
    match found {
        Some((index, _)) => {
            debug!(header_row = index, "located transaction header");
            Some(index)
        }
        None => {
            debug!(scanned = scan_limit(grid), "no transaction header in scan window");
            None
        }
    }
}

/// Returns every header candidate within the scan window, in row order.
pub fn candidate_rows(grid: &RawGrid) -> Vec<usize> {
    scan_window(grid)
        .filter(|(_, cells)| is_header_candidate(cells))
        .map(|(index, _)| index)
        .collect()
}

/// Number of rows the locator will actually look at for this grid.
pub fn scan_limit(grid: &RawGrid) -> usize {
    grid.len().min(MAX_SCAN_ROWS)
}

/// Whether a set of lowercased, non-empty cell values names the transaction
/// table columns.
pub fn is_header_candidate(cells: &[String]) -> bool {
    HEADER_KEYWORD_SETS.iter().any(|keywords| {
        keywords
            .iter()
            .all(|keyword| cells.iter().any(|cell| cell.contains(keyword)))
    })
}

fn scan_window(grid: &RawGrid) -> impl Iterator<Item = (usize, Vec<String>)> + '_ {
    grid.rows()
        .iter()
        .take(MAX_SCAN_ROWS)
        .map(|row| lowered_cells(row))
        .enumerate()
}

fn lowered_cells(row: &[String]) -> Vec<String> {
    row.iter()
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .map(str::to_lowercase)
        .collect()
}
