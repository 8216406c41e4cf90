//! Formatted terminal output for the `plot` subcommand.
//!
//! We keep formatting code in one place so output changes stay localized.

use crate::app::pipeline::RenderOutput;
use crate::domain::{CELLS, Cell, HTO_COLUMN, PERFORMANCE_COLUMN};
use crate::scene::Scene;

pub const LEGEND_TITLE: &str = "Quadrant Legend";

/// One legend line: `"1. Question & Develop – Low HTO & Performance."`
pub fn legend_line(cell: &Cell) -> String {
    format!("{}. {} – {}", cell.ordinal(), cell.title, cell.description)
}

/// The static legend listing all nine titles and descriptions.
pub fn format_legend() -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {LEGEND_TITLE} ===\n"));
    for cell in &CELLS {
        out.push_str(&legend_line(cell));
        out.push('\n');
    }
    out
}

/// Header block: source file and marker counts.
pub fn format_render_summary(output: &RenderOutput) -> String {
    let scene = &output.scene;
    let visible = scene.visible_markers().count();

    let mut out = String::new();
    out.push_str(&format!("=== ninebox - {} ===\n", scene.title));
    out.push_str(&format!(
        "File: {} ({})\n",
        output.source.display(),
        output.format.display_name()
    ));
    out.push_str(&format!(
        "Records: n={} | inside window: {visible}",
        scene.markers.len()
    ));
    let outside = scene.markers.len() - visible;
    if outside > 0 {
        out.push_str(&format!(" | outside [{}, {}]: {outside}", scene.x_axis.min, scene.x_axis.max));
    }
    out.push('\n');
    out
}

/// Per-record table (the non-interactive stand-in for hover).
pub fn format_marker_table(scene: &Scene) -> String {
    let name_width = scene
        .markers
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = String::new();
    out.push_str(&format!(
        "{:>3}  {:<name_width$}  {:>8}  {:>11}\n",
        "#", "Name", HTO_COLUMN, PERFORMANCE_COLUMN
    ));
    for (idx, m) in scene.markers.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}  {:<name_width$}  {:>8}  {:>11}\n",
            idx + 1,
            m.name,
            m.x,
            m.y
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScoreRecord;
    use crate::scene::build_scene;

    #[test]
    fn legend_lists_all_nine_cells_in_order() {
        let legend = format_legend();
        let lines: Vec<&str> = legend.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "1. Question & Develop – Low HTO & Performance.");
        assert_eq!(lines[9], "9. Star – High HTO & high performance.");
    }

    #[test]
    fn marker_table_has_one_row_per_record() {
        let scene = build_scene(
            &[
                ScoreRecord::new("Ada", 5.333, 2.1),
                ScoreRecord::new("Ada", 5.333, 2.1),
            ],
            &CELLS,
        );
        let table = format_marker_table(&scene);
        assert_eq!(table.lines().count(), 3);
        assert!(table.lines().nth(1).unwrap().contains("5.33"));
    }
}
