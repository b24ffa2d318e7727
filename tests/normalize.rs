use crdb_zoho::ConvertError;
use crdb_zoho::model::{OutputRecord, SemanticField};
use crdb_zoho::normalize::{
    ColumnMap, normalize_header, normalize_rows, pad_header, parse_date_relative_to,
    parse_date_str, parse_number,
};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

const HEADER: [&str; 6] = [
    "Posting Date",
    "Value Date",
    "Details",
    "Debit",
    "Credit",
    "Book Balance",
];

#[test]
fn parse_number_strips_separators_and_currency() {
    assert_eq!(parse_number("1,000.00"), 1000.0);
    assert_eq!(parse_number("1\u{a0}234 567.89"), 1_234_567.89);
    assert_eq!(parse_number("250.00 USD"), 250.0);
    assert_eq!(parse_number("USD 12"), 12.0);
    assert_eq!(parse_number("  42  "), 42.0);
    assert_eq!(parse_number("1_000.50"), 1000.5);
}

#[test]
fn parse_number_keeps_sign() {
    assert_eq!(parse_number("-1,500.50"), -1500.5);
}

#[test]
fn parse_number_degrades_to_zero() {
    assert_eq!(parse_number(""), 0.0);
    assert_eq!(parse_number("   "), 0.0);
    assert_eq!(parse_number("n/a"), 0.0);
    assert_eq!(parse_number("12.3.4"), 0.0);
    assert_eq!(parse_number("TZS 100"), 0.0);
}

#[test]
fn parse_number_is_idempotent_on_clean_output() {
    for raw in ["1,000.00", "0.10", "250 USD", "-3", "", "garbage", "1e3"] {
        let once = parse_number(raw);
        assert_eq!(parse_number(&once.to_string()), once, "input {raw:?}");
    }
}

#[test]
fn parse_date_resolves_day_first() {
    assert_eq!(parse_date_str("01/02/2023"), "2023-02-01");
    assert_eq!(parse_date_str("01-02-2023"), "2023-02-01");
    assert_eq!(parse_date_str("01.02.2023"), "2023-02-01");
    assert_eq!(parse_date_str("01/02/23"), "2023-02-01");
}

#[test]
fn parse_date_accepts_iso_and_textual_months() {
    assert_eq!(parse_date_str("2023-02-01"), "2023-02-01");
    assert_eq!(parse_date_str("2023-02-01 00:00:00"), "2023-02-01");
    assert_eq!(parse_date_str("01-Feb-2023"), "2023-02-01");
    assert_eq!(parse_date_str("01-FEB-23"), "2023-02-01");
    assert_eq!(parse_date_str("1 February 2023"), "2023-02-01");
    assert_eq!(parse_date_str("Feb 1, 2023"), "2023-02-01");
    assert_eq!(parse_date_str("01/02/2023 14:05"), "2023-02-01");
    assert_eq!(parse_date_str("01/FEB/2023"), "2023-02-01");
    assert_eq!(parse_date_str("01/Oct/23"), "2023-10-01");
    assert_eq!(parse_date_str("20230201"), "2023-02-01");
}

#[test]
fn two_digit_years_land_within_fifty_years_of_today() {
    let date = |value: &str| {
        parse_date_relative_to(value, 2026)
            .map(|date| date.to_string())
            .unwrap_or_default()
    };

    assert_eq!(date("01/02/23"), "2023-02-01");
    assert_eq!(date("01/02/70"), "2070-02-01");
    assert_eq!(date("01/02/76"), "1976-02-01");
    assert_eq!(date("01-Feb-99"), "1999-02-01");
    assert_eq!(date("01/02/1970"), "1970-02-01");
}

#[test]
fn parse_date_falls_back_to_month_first_when_day_first_is_impossible() {
    assert_eq!(parse_date_str("02/13/2023"), "2023-02-13");
}

#[test]
fn parse_date_degrades_to_empty() {
    assert_eq!(parse_date_str(""), "");
    assert_eq!(parse_date_str("   "), "");
    assert_eq!(parse_date_str("Opening balance"), "");
    assert_eq!(parse_date_str("32/13/2023"), "");
}

#[test]
fn header_names_are_whitespace_collapsed() {
    let header = normalize_header(&["  Posting \n Date ", "Value\tDate", ""]);

    assert_eq!(header, vec!["Posting Date", "Value Date", ""]);
}

#[test]
fn short_header_is_padded_with_extra_columns() {
    let header = pad_header(row(&["Posting Date", "Details"]), 4);

    assert_eq!(header, vec!["Posting Date", "Details", "extra_0", "extra_1"]);
}

#[test]
fn column_map_picks_left_most_match() {
    let header = ["Posting Date", "Details", "Debit", "Debit (USD)", "Credit", "Credit (USD)"];
    let columns = ColumnMap::from_header(&header);

    assert_eq!(columns.get(SemanticField::Debit), Some(2));
    assert_eq!(columns.get(SemanticField::Credit), Some(4));
    assert_eq!(columns.pick(&header, SemanticField::Debit), "Debit");
    assert_eq!(columns.get(SemanticField::ValueDate), None);
    assert_eq!(columns.pick(&header, SemanticField::BookBalance), "");
}

#[test]
fn column_map_resolves_all_fields() {
    let columns = ColumnMap::from_header(&HEADER);

    assert_eq!(columns.get(SemanticField::PostingDate), Some(0));
    assert_eq!(columns.get(SemanticField::ValueDate), Some(1));
    assert_eq!(columns.get(SemanticField::Details), Some(2));
    assert_eq!(columns.get(SemanticField::BookBalance), Some(5));
    assert!(columns.missing_required().is_empty());
}

#[test]
fn missing_credit_column_fails_conversion() {
    let header = ["Posting Date", "Value Date", "Details", "Debit", "Book Balance"];
    let error = normalize_rows(&header, &[row(&["01/02/2023", "", "x", "1", ""])])
        .expect_err("credit column is missing");

    match &error {
        ConvertError::MissingRequiredColumns { missing } => {
            assert_eq!(missing, &vec![SemanticField::Credit]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(error.to_string().contains("credit"));
    assert_eq!(SemanticField::BookBalance.to_string(), "book_balance");
}

#[test]
fn missing_fields_are_all_reported() {
    let error = normalize_rows(&["Date", "Narration"], &Vec::<Vec<String>>::new())
        .expect_err("nothing maps");

    assert_eq!(
        error.to_string(),
        "missing required columns: posting_date, details, debit, credit"
    );
}

#[test]
fn wire_in_row_becomes_deposit() {
    let rows = vec![row(&["01/02/2023", "02/02/2023", "Wire in", "", "1,000.00", "5,000.00"])];
    let records = normalize_rows(&HEADER, &rows).expect("rows normalized");

    assert_eq!(
        records,
        vec![OutputRecord::new("2023-02-01", 0.0, 1000.0, "Wire in")]
    );
    assert_eq!(records[0].payee, "");
    assert_eq!(records[0].description, "Transfer");
}

#[test]
fn retention_filter_drops_undated_and_empty_rows() {
    let rows = vec![
        row(&["", "", "", "", "", ""]),
        row(&["", "", "Subtotal", "100.00", "200.00", ""]),
        row(&["Opening balance", "", "", "", "", "5,000.00"]),
        row(&["05/02/2023", "", "", "", "", ""]),
        row(&["06/02/2023", "", "Memo only", "", "", ""]),
        row(&["07/02/2023", "", "", "80.00", "", ""]),
    ];
    let records = normalize_rows(&HEADER, &rows).expect("rows normalized");

    assert_eq!(
        records,
        vec![
            OutputRecord::new("2023-02-06", 0.0, 0.0, "Memo only"),
            OutputRecord::new("2023-02-07", 80.0, 0.0, ""),
        ]
    );
}

#[test]
fn short_rows_read_missing_cells_as_blank() {
    let rows = vec![row(&["08/02/2023", "", "Fee", "5"])];
    let records = normalize_rows(&HEADER, &rows).expect("rows normalized");

    assert_eq!(records, vec![OutputRecord::new("2023-02-08", 5.0, 0.0, "Fee")]);
}

#[test]
fn retention_requires_a_date() {
    let undated = OutputRecord::new("", 10.0, 0.0, "ref");
    let dated = OutputRecord::new("2023-01-01", 0.0, 0.0, "");

    assert!(!undated.is_retained());
    assert!(!dated.is_retained());
    assert!(OutputRecord::new("2023-01-01", 0.0, 0.5, "").is_retained());
}
