//! Maps header columns to semantic fields and turns statement rows into
//! ledger import records.

pub mod parse;

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::crdb::zoho::error::{ConvertError, Result};
use crate::crdb::zoho::model::{OutputRecord, SemanticField};

pub use parse::{parse_date, parse_date_relative_to, parse_date_str, parse_number};

/// Prefix for names given to data columns that extend past the header.
pub const EXTRA_COLUMN_PREFIX: &str = "extra_";

/// Collapses internal whitespace runs to one space and trims every name.
pub fn normalize_header<S: AsRef<str>>(cells: &[S]) -> Vec<String> {
    cells
        .iter()
        .map(|cell| cell.as_ref().split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

/// Extends `header` with `extra_N` names until it covers `width` columns.
pub fn pad_header(mut header: Vec<String>, width: usize) -> Vec<String> {
    let missing = width.saturating_sub(header.len());
    header.extend((0..missing).map(|index| format!("{EXTRA_COLUMN_PREFIX}{index}")));
    header
}

/// Chosen column for each semantic field, by header position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: BTreeMap<SemanticField, usize>,
}

impl ColumnMap {
    /// Maps every semantic field to the left-most header column whose
    /// lowercased name satisfies it. Unmatched fields stay absent.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Self {
        let lowered: Vec<String> = header
            .iter()
            .map(|name| name.as_ref().to_lowercase())
            .collect();
        let columns = SemanticField::ALL
            .into_iter()
            .filter_map(|field| {
                lowered
                    .iter()
                    .position(|name| field.matches(name))
                    .map(|index| (field, index))
            })
            .collect();
        Self { columns }
    }

    /// Column index chosen for `field`.
    pub fn get(&self, field: SemanticField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    /// Header text chosen for `field`, empty when unmapped.
    pub fn pick<'a, S: AsRef<str>>(&self, header: &'a [S], field: SemanticField) -> &'a str {
        self.get(field)
            .and_then(|index| header.get(index))
            .map(|name| name.as_ref())
            .unwrap_or("")
    }

    /// Required fields that could not be mapped, in declaration order.
    pub fn missing_required(&self) -> Vec<SemanticField> {
        SemanticField::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).is_none())
            .collect()
    }

    /// Fails with [`ConvertError::MissingRequiredColumns`] unless every
    /// required field is mapped.
    pub fn ensure_required(&self) -> Result<()> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConvertError::MissingRequiredColumns { missing })
        }
    }
}

/// Converts the rows under a header into retained output records.
///
/// `header` is the raw header row; it is normalized and padded here. Fails
/// only when one of the required columns cannot be mapped.
#[instrument(level = "debug", skip_all, fields(row_count = rows.len()))]
pub fn normalize_rows<H, R>(header: &[H], rows: &[R]) -> Result<Vec<OutputRecord>>
where
    H: AsRef<str>,
    R: AsRef<[String]>,
{
    let width = rows
        .iter()
        .map(|row| row.as_ref().len())
        .max()
        .unwrap_or(0);
    let header = pad_header(normalize_header(header), width);
    let columns = ColumnMap::from_header(&header);
    columns.ensure_required()?;
    debug!(
        posting_date = columns.pick(&header, SemanticField::PostingDate),
        details = columns.pick(&header, SemanticField::Details),
        debit = columns.pick(&header, SemanticField::Debit),
        credit = columns.pick(&header, SemanticField::Credit),
        "mapped statement columns"
    );

    let records: Vec<OutputRecord> = rows
        .iter()
        .map(|row| build_record(&columns, row.as_ref()))
        .filter(OutputRecord::is_retained)
        .collect();
    debug!(retained = records.len(), "normalized statement rows");
    Ok(records)
}

fn build_record(columns: &ColumnMap, row: &[String]) -> OutputRecord {
    OutputRecord::new(
        parse_date_str(field_cell(columns, row, SemanticField::PostingDate)),
        parse_number(field_cell(columns, row, SemanticField::Debit)),
        parse_number(field_cell(columns, row, SemanticField::Credit)),
        field_cell(columns, row, SemanticField::Details),
    )
}

fn field_cell<'a>(columns: &ColumnMap, row: &'a [String], field: SemanticField) -> &'a str {
    columns
        .get(field)
        .and_then(|index| row.get(index))
        .map(String::as_str)
        .unwrap_or("")
}
