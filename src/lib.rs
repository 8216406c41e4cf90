//! `ninebox` library crate.
//!
//! The binary (`ninebox`) is a thin wrapper around this library so that:
//!
//! - the render pass is testable without spawning processes or a terminal
//! - the scene can be drawn by more than one front-end (TUI, plain text)

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod scene;
pub mod tui;
