#![allow(dead_code)]

use std::path::Path;

use rust_xlsxwriter::Workbook;

/// Header row of a CRDB statement export.
pub const HEADER: [&str; 6] = [
    "Posting Date",
    "Value Date",
    "Details",
    "Debit",
    "Credit",
    "Book Balance",
];

/// Writes `rows` into the first worksheet of a new workbook at `path`.
/// Empty strings leave the cell blank.
pub fn write_sheet(path: &Path, rows: &[Vec<&str>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            worksheet
                .write_string(row_idx as u32, col_idx as u16, *cell)
                .expect("cell written");
        }
    }
    workbook.save(path).expect("workbook saved");
}

/// A statement with a banner above the transaction table.
pub fn statement_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec!["CRDB BANK PLC", "", "", "", "", ""],
        vec!["Account Statement", "", "", "", "", ""],
        vec!["Account No", "0150000000", "", "", "", ""],
        HEADER.to_vec(),
        vec!["01/02/2023", "02/02/2023", "Wire in", "", "1,000.00", "5,000.00"],
        vec!["03/02/2023", "03/02/2023", "ATM withdrawal", "250.00 USD", "", "4,750.00"],
        vec!["", "", "", "", "", ""],
        vec!["", "", "Closing balance", "", "", "4,750.00"],
    ]
}
