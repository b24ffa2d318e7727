pub mod zoho;
