use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::crdb::zoho::error::Result;
use crate::crdb::zoho::model::OutputRecord;

/// Field separator of the ledger import format.
pub const DELIMITER: u8 = b';';

/// Writes the records to `path`, replacing any existing file.
pub fn write_records(path: &Path, records: &[OutputRecord]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_records_to(file, records)
}

/// Writes the header line followed by one line per record.
///
/// The header is always written, even for an empty statement.
pub fn write_records_to<W: Write>(writer: W, records: &[OutputRecord]) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(OutputRecord::HEADERS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
