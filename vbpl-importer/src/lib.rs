//! Importer for the provincial VBQPPL tracking workbook.
//!
//! Reads the five tracking worksheets, normalizes their rows into document
//! records and loads them into the datastore in batches.

pub mod observability;
pub mod pipeline;
pub mod sheets;
pub mod workbook;
