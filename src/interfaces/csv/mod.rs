//! CSV adapters for the command line: session scripts in, reports out.

pub mod event_reader;
pub mod report_writer;
pub mod transaction_writer;
