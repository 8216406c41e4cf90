//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs logging
//! - runs the interactive dashboard or a one-shot plot

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::{Command, PlotArgs, TuiArgs};
use crate::domain::DashboardConfig;
use crate::error::AppError;
use crate::logging::LogSink;

pub mod pipeline;

/// Entry point for the `ninebox` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is the normal case.
    let _ = dotenvy::dotenv();

    // We want `ninebox` and `ninebox -f team.csv` to behave like `ninebox tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args, cli.verbose),
        Command::Plot(args) => handle_plot(args, cli.verbose),
    }
}

fn handle_tui(args: TuiArgs, verbose: u8) -> Result<(), AppError> {
    let sink = match &args.log_file {
        Some(path) => LogSink::File(path.clone()),
        None => LogSink::Off,
    };
    crate::logging::init(verbose, sink)?;

    let config = dashboard_config_from_args(&args);
    tracing::info!(initial_file = ?config.initial_file, "starting dashboard");
    crate::tui::run(config)
}

fn handle_plot(args: PlotArgs, verbose: u8) -> Result<(), AppError> {
    crate::logging::init(verbose, LogSink::Stderr)?;

    let path = match &args.file {
        Some(path) => path.clone(),
        None if std::io::stdin().is_terminal() => {
            crate::cli::picker::prompt_for_score_path(args.search_depth)?
        }
        None => {
            return Err(AppError::new(
                2,
                "No input file. Provide one with `ninebox plot -f <file>`.",
            ));
        }
    };

    let result = pipeline::render_pass(&path);

    if let Ok(output) = &result {
        println!("{}", crate::report::format_render_summary(output));
        println!(
            "{}",
            crate::plot::render_ascii_scene(&output.scene, args.width, args.height)
        );
        println!("{}", crate::report::format_marker_table(&output.scene));
    }

    // The legend is printed whether or not the render pass succeeded.
    print!("{}", crate::report::format_legend());

    result.map(|_| ()).map_err(AppError::from)
}

pub fn dashboard_config_from_args(args: &TuiArgs) -> DashboardConfig {
    DashboardConfig {
        initial_file: args.file.clone(),
        search_root: PathBuf::from("."),
        search_depth: args.search_depth,
    }
}

/// Rewrite argv so `ninebox` defaults to `ninebox tui`.
///
/// Rules:
/// - `ninebox`                  -> `ninebox tui`
/// - `ninebox -f team.csv ...`  -> `ninebox tui -f team.csv ...`
/// - `ninebox -v plot ...`      -> unchanged (verbosity flags are global)
/// - `ninebox --help/--version` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let first_non_verbose = argv
        .iter()
        .skip(1)
        .find(|arg| !is_verbosity_flag(arg))
        .cloned();

    let Some(arg) = first_non_verbose else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg.as_str(), "tui" | "plot");
    if is_subcommand {
        return argv;
    }

    // A flag or a bare path: treat it as "tui flags".
    if arg.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }
    if Path::new(&arg).extension().is_some() {
        let pos = argv.iter().position(|a| *a == arg).unwrap_or(1);
        argv.insert(pos, "-f".to_string());
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is and let clap report it.
    argv
}

fn is_verbosity_flag(arg: &str) -> bool {
    arg == "--verbose" || (arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["ninebox"])), argv(&["ninebox", "tui"]));
        assert_eq!(rewrite_args(argv(&["ninebox", "-vv"])), argv(&["ninebox", "-vv", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["ninebox", "-f", "team.csv"])),
            argv(&["ninebox", "tui", "-f", "team.csv"])
        );
    }

    #[test]
    fn bare_path_becomes_file_flag() {
        assert_eq!(
            rewrite_args(argv(&["ninebox", "team.xlsx"])),
            argv(&["ninebox", "tui", "-f", "team.xlsx"])
        );
    }

    #[test]
    fn subcommands_help_and_global_flags_are_untouched() {
        let plot = argv(&["ninebox", "-v", "plot", "-f", "a.csv"]);
        assert_eq!(rewrite_args(plot.clone()), plot);
        assert_eq!(rewrite_args(argv(&["ninebox", "--help"])), argv(&["ninebox", "--help"]));
    }

    #[test]
    fn config_comes_from_args() {
        let args = TuiArgs {
            file: Some(PathBuf::from("team.csv")),
            search_depth: 2,
            log_file: None,
        };
        let config = dashboard_config_from_args(&args);
        assert_eq!(config.initial_file, Some(PathBuf::from("team.csv")));
        assert_eq!(config.search_depth, 2);
        assert_eq!(config.search_root, PathBuf::from("."));
    }
}
