//! Command-line parsing for the 9-box dashboard.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! render pass and the front-ends.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ninebox", version, about = "9-Box talent matrix dashboard for the terminal")]
pub struct Cli {
    /// Log verbosity (-v, -vv, -vvv). Without `-v`, `RUST_LOG` applies (default `warn`).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (default).
    Tui(TuiArgs),
    /// Render one file to stdout: summary, character chart, records and legend.
    Plot(PlotArgs),
}

/// Options for the interactive dashboard.
#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Score file (.csv or .xlsx) to open on start.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// How many directory levels the open dialog searches.
    #[arg(long, default_value_t = picker::DEFAULT_SEARCH_DEPTH)]
    pub search_depth: usize,

    /// Append logs to this file (the dashboard owns the terminal otherwise).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Options for one-shot terminal output.
#[derive(Debug, Parser, Clone)]
pub struct PlotArgs {
    /// Score file (.csv or .xlsx). Prompts with a picker when omitted.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 73)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// How many directory levels the picker searches.
    #[arg(long, default_value_t = picker::DEFAULT_SEARCH_DEPTH)]
    pub search_depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_args_parse() {
        let cli = Cli::parse_from(["ninebox", "-v", "plot", "-f", "team.csv", "--width", "40"]);
        assert_eq!(cli.verbose, 1);
        let Command::Plot(args) = cli.command else {
            panic!("expected plot");
        };
        assert_eq!(args.file, Some(PathBuf::from("team.csv")));
        assert_eq!(args.width, 40);
        assert_eq!(args.height, 25);
    }

    #[test]
    fn tui_defaults() {
        let cli = Cli::parse_from(["ninebox", "tui"]);
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        assert!(args.file.is_none());
        assert_eq!(args.search_depth, picker::DEFAULT_SEARCH_DEPTH);
    }
}
