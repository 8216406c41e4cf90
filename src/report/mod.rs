//! Reporting utilities: legend and formatted terminal output.

pub mod format;

pub use format::*;
