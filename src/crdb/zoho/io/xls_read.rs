use std::fs;
use std::io::Cursor;
use std::path::Path;

use calamine::{DataType, Range, Reader, open_workbook_auto_from_rs};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, instrument};

use crate::crdb::zoho::error::{ConvertError, Result};
use crate::crdb::zoho::model::RawGrid;

/// Layout used for date-time cells rendered as text.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reads the first worksheet of a statement workbook as an untyped grid.
///
/// The format is detected from the file contents rather than the extension,
/// since statement exports named `.xls` are not always BIFF workbooks. Every
/// cell is rendered to trimmed text.
#[instrument(level = "debug", skip_all, fields(input = %path.display()))]
pub fn read_grid(path: &Path) -> Result<RawGrid> {
    let bytes = fs::read(path)?;
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ConvertError::EmptyWorkbook)??;
    let grid = range_to_grid(&range);
    debug!(rows = grid.len(), columns = grid.width(), "read worksheet");
    Ok(grid)
}

/// Renders a calamine range into a grid anchored at cell A1.
///
/// calamine ranges begin at the first used cell, so blank leading rows and
/// columns are restored as empty cells; grid indices then match the sheet's
/// own row numbers. Every row keeps the full width.
pub fn range_to_grid(range: &Range<DataType>) -> RawGrid {
    let (first_row, first_col) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));
    let width = first_col + range.width();
    let leading = (0..first_row).map(|_| vec![String::new(); width]);
    let used = range.rows().map(|row| {
        std::iter::repeat_n(String::new(), first_col)
            .chain(row.iter().map(cell_to_string))
            .collect::<Vec<_>>()
    });
    RawGrid::new(leading.chain(used))
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::DateTime(serial) => serial_to_datetime(*serial)
            .map(|datetime| datetime.format(DATE_TIME_FORMAT).to_string())
            .unwrap_or_default(),
        DataType::Error(_) | DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Converts a 1900 date system serial number into a date-time.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}
