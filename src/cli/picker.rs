//! Locating score files on disk.
//!
//! `discover_score_files` walks the working tree for `.csv` / `.xlsx` files and
//! backs both the TUI open dialog and the numbered prompt that `ninebox plot`
//! falls back to when run without `-f` on a terminal.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::{AppError, RenderError};
use crate::io::ingest::InputFormat;

/// How many directory levels below the root are searched.
pub const DEFAULT_SEARCH_DEPTH: usize = 4;

/// One line of user input at the numbered prompt.
#[derive(Debug, PartialEq)]
enum Reply {
    Quit,
    Pick(PathBuf),
    Retry(String),
}

fn interpret_reply(input: &str, files: &[PathBuf]) -> Reply {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Reply::Quit;
    }
    let candidate = match input.parse::<usize>() {
        Ok(n) => match n.checked_sub(1).and_then(|idx| files.get(idx)) {
            Some(path) => path.clone(),
            None => return Reply::Retry(format!("No file numbered {n}; pick 1-{}.", files.len())),
        },
        Err(_) => PathBuf::from(input),
    };
    match validate_score_path(&candidate) {
        Ok(path) => Reply::Pick(path),
        Err(err) => Reply::Retry(err.to_string()),
    }
}

/// List score files under `.` and read a number or a path from stdin.
pub fn prompt_for_score_path(max_depth: usize) -> Result<PathBuf, AppError> {
    let files = discover_score_files(Path::new("."), max_depth);
    if files.is_empty() {
        return Err(AppError::new(
            2,
            "No .csv or .xlsx files found. Provide one with `ninebox plot -f <file>`.",
        ));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let io_err = |e: io::Error| AppError::new(2, format!("Prompt I/O failed: {e}"));

    writeln!(stdout, "Score files under the current directory:").map_err(io_err)?;
    for (n, path) in files.iter().enumerate() {
        writeln!(stdout, "{:>3}) {}", n + 1, pretty_path(path)).map_err(io_err)?;
    }

    let mut line = String::new();
    loop {
        write!(stdout, "File number or path [q quits]: ").map_err(io_err)?;
        stdout.flush().map_err(io_err)?;

        line.clear();
        if stdin.lock().read_line(&mut line).map_err(io_err)? == 0 {
            return Err(AppError::new(2, "stdin closed before a file was chosen."));
        }

        match interpret_reply(&line, &files) {
            Reply::Quit => return Err(AppError::new(2, "Canceled.")),
            Reply::Pick(path) => return Ok(path),
            Reply::Retry(message) => writeln!(stdout, "{message}").map_err(io_err)?,
        }
    }
}

/// Accept `path` only if it is an existing file with a supported extension.
pub fn validate_score_path(path: &Path) -> Result<PathBuf, RenderError> {
    let meta = fs::metadata(path)
        .map_err(|_| RenderError::read(format!("file not found: {}", path.display())))?;
    if !meta.is_file() {
        return Err(RenderError::read(format!("not a regular file: {}", path.display())));
    }
    InputFormat::from_path(path)?;
    Ok(path.to_path_buf())
}

/// `.csv` / `.xlsx` files under `root`, at most `max_depth` directories down,
/// sorted by display path. Unreadable directories are skipped silently.
pub fn discover_score_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![(root.to_path_buf(), 0usize)];

    while let Some((dir, depth)) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(kind) = entry.file_type() else {
                continue;
            };
            if kind.is_dir() {
                if depth < max_depth && !is_ignored_dir(&path) {
                    pending.push((path, depth + 1));
                }
            } else if kind.is_file() && InputFormat::from_path(&path).is_ok() {
                found.push(path);
            }
        }
    }

    found.sort_by_cached_key(|p| pretty_path(p));
    found
}

fn is_ignored_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| matches!(name, ".git" | "target" | "node_modules"))
}

/// Path for display, without a leading `./`.
pub fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_csv_and_xlsx_skipping_build_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("data/nested")).unwrap();
        fs::create_dir_all(root.join("target")).unwrap();
        fs::write(root.join("b.csv"), "").unwrap();
        fs::write(root.join("data/a.XLSX"), "").unwrap();
        fs::write(root.join("data/nested/c.csv"), "").unwrap();
        fs::write(root.join("target/ignored.csv"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();

        let found: Vec<PathBuf> = discover_score_files(root, DEFAULT_SEARCH_DEPTH)
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            found,
            vec![
                PathBuf::from("b.csv"),
                PathBuf::from("data/a.XLSX"),
                PathBuf::from("data/nested/c.csv"),
            ]
        );
    }

    #[test]
    fn depth_limit_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("deep")).unwrap();
        fs::write(dir.path().join("deep/a.csv"), "").unwrap();

        assert!(discover_score_files(dir.path(), 0).is_empty());
        assert_eq!(discover_score_files(dir.path(), 1).len(), 1);
    }

    #[test]
    fn replies_pick_by_number_or_path() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("team.csv");
        fs::write(&csv, "").unwrap();
        let files = vec![csv.clone()];

        assert_eq!(interpret_reply(" 1\n", &files), Reply::Pick(csv.clone()));
        assert_eq!(interpret_reply(csv.to_str().unwrap(), &files), Reply::Pick(csv));
        assert_eq!(interpret_reply("Q", &files), Reply::Quit);
        assert!(matches!(interpret_reply("0", &files), Reply::Retry(_)));
        assert!(matches!(interpret_reply("2", &files), Reply::Retry(_)));
        assert!(matches!(interpret_reply("missing.csv", &files), Reply::Retry(_)));
    }

    #[test]
    fn validate_rejects_missing_dirs_and_other_types() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("a.txt");
        fs::write(&txt, "").unwrap();

        assert!(validate_score_path(&dir.path().join("nope.csv")).is_err());
        assert!(validate_score_path(dir.path()).is_err());
        assert!(validate_score_path(&txt).is_err());
    }
}
