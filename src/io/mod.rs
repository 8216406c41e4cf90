//! Input helpers.
//!
//! - CSV / XLSX ingest + column validation (`ingest`)

pub mod ingest;

pub use ingest::*;
