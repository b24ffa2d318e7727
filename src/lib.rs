//! Core library for the crdb-zoho command line application.
//!
//! Converts CRDB bank statement spreadsheets into the semicolon separated
//! import format of a Zoho Books style ledger. Spreadsheet and CSV adapters
//! live under [`crdb::zoho::io`], header detection in [`crdb::zoho::locate`],
//! column mapping and cell parsing in [`crdb::zoho::normalize`], and the
//! single-file and directory drivers in [`crdb::zoho::convert`] and
//! [`crdb::zoho::batch`].

pub mod crdb;

pub use crdb::zoho::{
    ConvertError, Result, batch, convert, error, inspect, io, locate, model, normalize,
};
