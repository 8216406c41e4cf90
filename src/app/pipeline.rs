//! Shared "render pass" used by both the `plot` subcommand and the TUI.
//!
//! open file -> validate columns -> coerce scores -> build scene
//!
//! Front-ends only decide how to present the result (printing vs widgets).

use std::path::{Path, PathBuf};

use crate::domain::CELLS;
use crate::error::RenderError;
use crate::io::ingest::{InputFormat, load_score_table};
use crate::scene::{Scene, build_scene};

/// Everything produced by one successful render pass.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub source: PathBuf,
    pub format: InputFormat,
    pub scene: Scene,
}

/// Run one render pass for the file at `path`.
///
/// Either the complete scene is returned or nothing is.
pub fn render_pass(path: &Path) -> Result<RenderOutput, RenderError> {
    let span = tracing::info_span!("render_pass", path = %path.display());
    let _enter = span.enter();

    let ingest = load_score_table(path).inspect_err(|err| {
        tracing::warn!(kind = err.kind(), error = %err, "render pass aborted");
    })?;

    let scene = build_scene(&ingest.records, &CELLS);
    tracing::debug!(
        markers = scene.markers.len(),
        visible = scene.visible_markers().count(),
        "scene built"
    );

    Ok(RenderOutput {
        source: ingest.source,
        format: ingest.format,
        scene,
    })
}

/// What the dashboard currently shows. The legend is drawn in every state.
#[derive(Debug, Clone, Default)]
pub enum DashboardState {
    /// Nothing opened yet.
    #[default]
    Empty,
    /// Chart ready.
    Ready(RenderOutput),
    /// Last render pass failed; shown inline until the next open.
    Failed { source: PathBuf, error: RenderError },
}

impl DashboardState {
    /// Replace the current state with the outcome of a render pass on `path`.
    pub fn open(&mut self, path: &Path) {
        *self = match render_pass(path) {
            Ok(output) => Self::Ready(output),
            Err(error) => Self::Failed {
                source: path.to_path_buf(),
                error,
            },
        };
    }

    pub fn scene(&self) -> Option<&Scene> {
        match self {
            Self::Ready(output) => Some(&output.scene),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_column_produces_no_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "team.csv", "Name,HTO\nAda,1\n");

        let mut state = DashboardState::default();
        state.open(&path);

        assert!(state.scene().is_none());
        assert!(matches!(
            state,
            DashboardState::Failed {
                error: RenderError::MissingColumns { .. },
                ..
            }
        ));
    }

    #[test]
    fn empty_table_renders_cells_without_markers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "team.csv", "Name,HTO,Performance\n");

        let output = render_pass(&path).unwrap();
        assert_eq!(output.scene.cells.len(), 9);
        assert!(output.scene.markers.is_empty());
        assert_eq!(output.format, InputFormat::Csv);
    }

    #[test]
    fn new_open_replaces_failed_state() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_file(&dir, "bad.csv", "Name,HTO,Performance\nAda,x,1\n");
        let good = write_file(&dir, "good.csv", "Name,HTO,Performance\nAda,5.333,2.1\n");

        let mut state = DashboardState::default();
        state.open(&bad);
        assert!(matches!(
            state,
            DashboardState::Failed {
                error: RenderError::Read(_),
                ..
            }
        ));

        state.open(&good);
        let scene = state.scene().unwrap();
        assert_eq!((scene.markers[0].x, scene.markers[0].y), (5.33, 2.1));
    }
}
