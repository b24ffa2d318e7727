use std::fmt;

use serde::Serialize;

/// Untyped cell grid read from the first worksheet of a statement.
///
/// Every cell is stored as trimmed text; an empty string stands for a blank
/// cell. No type inference happens at load time, dates and amounts stay text
/// until the row normalizer parses them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGrid {
    rows: Vec<Vec<String>>,
}

impl RawGrid {
    /// Builds a grid from raw rows, trimming every cell.
    pub fn new<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.as_ref().trim().to_string())
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row in the grid.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Canonical transaction attribute located among arbitrarily named columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SemanticField {
    PostingDate,
    Details,
    ValueDate,
    Debit,
    Credit,
    BookBalance,
}

impl SemanticField {
    /// All fields in mapping order.
    pub const ALL: [SemanticField; 6] = [
        SemanticField::PostingDate,
        SemanticField::Details,
        SemanticField::ValueDate,
        SemanticField::Debit,
        SemanticField::Credit,
        SemanticField::BookBalance,
    ];

    /// Fields that must resolve for a conversion to proceed.
    pub const REQUIRED: [SemanticField; 4] = [
        SemanticField::PostingDate,
        SemanticField::Details,
        SemanticField::Debit,
        SemanticField::Credit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SemanticField::PostingDate => "posting_date",
            SemanticField::Details => "details",
            SemanticField::ValueDate => "value_date",
            SemanticField::Debit => "debit",
            SemanticField::Credit => "credit",
            SemanticField::BookBalance => "book_balance",
        }
    }

    /// Substrings a lowercased column name must all contain to map to this field.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SemanticField::PostingDate => &["posting", "date"],
            SemanticField::Details => &["details"],
            SemanticField::ValueDate => &["value", "date"],
            SemanticField::Debit => &["debit"],
            SemanticField::Credit => &["credit"],
            SemanticField::BookBalance => &["book", "balance"],
        }
    }

    /// Whether an already lowercased column name satisfies this field.
    pub fn matches(self, lowered_column: &str) -> bool {
        self.keywords()
            .iter()
            .all(|keyword| lowered_column.contains(keyword))
    }
}

impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal written to the `Description` column of every record.
pub const TRANSFER_DESCRIPTION: &str = "Transfer";

/// One ledger import line derived from a statement row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    /// ISO 8601 posting date, empty when the source cell did not parse.
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Withdrawals")]
    pub withdrawals: f64,
    #[serde(rename = "Deposits")]
    pub deposits: f64,
    /// Never derivable from the statement, always empty.
    #[serde(rename = "Payee")]
    pub payee: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Raw details text of the statement row.
    #[serde(rename = "Reference Number")]
    pub reference_number: String,
}

impl OutputRecord {
    /// Column names in output order.
    pub const HEADERS: [&'static str; 6] = [
        "Date",
        "Withdrawals",
        "Deposits",
        "Payee",
        "Description",
        "Reference Number",
    ];

    pub fn new(
        date: impl Into<String>,
        withdrawals: f64,
        deposits: f64,
        reference_number: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            withdrawals,
            deposits,
            payee: String::new(),
            description: TRANSFER_DESCRIPTION.to_string(),
            reference_number: reference_number.into(),
        }
    }

    /// Whether the row represents a transaction worth importing.
    ///
    /// A dated row is kept when it moves money or carries a reference; rows
    /// without a date are always dropped.
    pub fn is_retained(&self) -> bool {
        !self.date.is_empty()
            && (self.withdrawals > 0.0 || self.deposits > 0.0 || !self.reference_number.is_empty())
    }
}
