pub mod csv_write;
pub mod xls_read;
