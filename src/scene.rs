//! Renderer-agnostic scene description.
//!
//! A `Scene` is everything a front-end needs to draw the 9-box: nine shaded,
//! titled background cells, one marker per record, and the fixed axes. Both
//! the Ratatui dashboard and the character plot consume it; neither decides
//! anything about layout or colors on its own.

use crate::domain::{
    AXIS_MAX, AXIS_MIN, Bounds, CELL_SIZE, Cell, HTO_COLUMN, PERFORMANCE_COLUMN, ScoreRecord, Tier,
    round2,
};

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub const COLOR_LIGHT: Rgb = Rgb(0xd9, 0xd9, 0xd9);
pub const COLOR_MEDIUM: Rgb = Rgb(0xbf, 0xbf, 0xbf);
pub const COLOR_DARK: Rgb = Rgb(0x80, 0x80, 0x80);
/// Accent used for every marker.
pub const COLOR_POINTS: Rgb = Rgb(0x80, 0x00, 0x80);
pub const COLOR_OUTLINE: Rgb = Rgb(0, 0, 0);

/// Background cells are translucent so markers stay legible on top.
pub const CELL_OPACITY: f64 = 0.4;

/// Title label offset from the cell's lower-left corner.
const LABEL_OFFSET: (f64, f64) = (0.5, 1.5);

pub fn tier_color(tier: Tier) -> Rgb {
    match tier {
        Tier::Light => COLOR_LIGHT,
        Tier::Medium => COLOR_MEDIUM,
        Tier::Dark => COLOR_DARK,
    }
}

/// Text anchored at a display coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: &'static str,
    pub x: f64,
    pub y: f64,
}

/// Draw instruction for one background cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellShape {
    pub cell: Cell,
    pub bounds: Bounds,
    pub fill: Rgb,
    pub opacity: f64,
    pub label: Label,
}

/// Draw instruction for one record. `name` is hover-only metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub name: String,
}

/// Shared look of every marker.
///
/// `size` and the outline are scene metadata for vector back-ends; the
/// terminal renderers are limited to one cell or pixel and only read `color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub color: Rgb,
    pub size: u32,
    pub outline: Rgb,
    pub outline_width: u32,
}

pub const MARKER_STYLE: MarkerStyle = MarkerStyle {
    color: COLOR_POINTS,
    size: 12,
    outline: COLOR_OUTLINE,
    outline_width: 1,
};

/// A fixed axis with evenly spaced gridlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub title: &'static str,
    pub min: f64,
    pub max: f64,
    pub tick_step: f64,
}

impl Axis {
    const fn fixed(title: &'static str) -> Self {
        Self {
            title,
            min: AXIS_MIN,
            max: AXIS_MAX,
            tick_step: CELL_SIZE,
        }
    }

    /// Gridline positions from `min` to `max` inclusive.
    pub fn ticks(&self) -> Vec<f64> {
        let n = ((self.max - self.min) / self.tick_step).round() as usize;
        (0..=n).map(|k| self.min + k as f64 * self.tick_step).collect()
    }

    /// True when `v` falls inside `[min, max]`.
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

pub const SCENE_TITLE: &str = "9-Box Talent Matrix";

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub title: &'static str,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub cells: Vec<CellShape>,
    pub markers: Vec<Marker>,
    pub marker_style: MarkerStyle,
}

impl Scene {
    /// Tooltip for the marker at `idx`, or `None` if there is no such marker.
    pub fn hover_text(&self, idx: usize) -> Option<String> {
        let m = self.markers.get(idx)?;
        Some(format!(
            "{}\n{HTO_COLUMN}: {}\n{PERFORMANCE_COLUMN}: {}",
            m.name, m.x, m.y
        ))
    }

    /// Markers whose coordinates fall inside the visible window.
    pub fn visible_markers(&self) -> impl Iterator<Item = (usize, &Marker)> {
        self.markers
            .iter()
            .enumerate()
            .filter(|(_, m)| self.x_axis.contains(m.x) && self.y_axis.contains(m.y))
    }
}

/// Build the scene for one render pass.
///
/// Cells come from `cells` verbatim; markers are placed at the 2-decimal
/// rounded scores, in input order, without clamping or deduplication.
pub fn build_scene(records: &[ScoreRecord], cells: &[Cell]) -> Scene {
    let cells = cells
        .iter()
        .map(|cell| {
            let bounds = cell.bounds();
            CellShape {
                cell: *cell,
                bounds,
                fill: tier_color(cell.tier),
                opacity: CELL_OPACITY,
                label: Label {
                    text: cell.title,
                    x: bounds.x0 + LABEL_OFFSET.0,
                    y: bounds.y0 + LABEL_OFFSET.1,
                },
            }
        })
        .collect();

    let markers = records
        .iter()
        .map(|r| Marker {
            x: round2(r.hto),
            y: round2(r.performance),
            name: r.name.clone(),
        })
        .collect();

    Scene {
        title: SCENE_TITLE,
        x_axis: Axis::fixed("HTO Score"),
        y_axis: Axis::fixed("Performance Score"),
        cells,
        markers,
        marker_style: MARKER_STYLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CELLS, lookup};

    #[test]
    fn empty_records_still_yield_nine_cells() {
        let scene = build_scene(&[], &CELLS);
        assert_eq!(scene.cells.len(), 9);
        assert!(scene.markers.is_empty());
    }

    #[test]
    fn marker_uses_rounded_coordinates() {
        let scene = build_scene(&[ScoreRecord::new("Ada", 5.333, 2.1)], &CELLS);
        let m = &scene.markers[0];
        assert_eq!((m.x, m.y), (5.33, 2.1));
        assert_eq!(m.name, "Ada");
    }

    #[test]
    fn marker_ties_round_to_even() {
        let scene = build_scene(&[ScoreRecord::new("Ada", 0.125, 4.625)], &CELLS);
        let m = &scene.markers[0];
        assert_eq!((m.x, m.y), (0.12, 4.62));
        assert_eq!(scene.hover_text(0).unwrap(), "Ada\nHTO: 0.12\nPerformance: 4.62");
    }

    #[test]
    fn out_of_window_marker_is_not_clamped() {
        let scene = build_scene(&[ScoreRecord::new("Ada", 7.0, 3.0)], &CELLS);
        assert_eq!(scene.markers[0].x, 7.0);
        assert_eq!(scene.visible_markers().count(), 0);
    }

    #[test]
    fn duplicate_coordinates_produce_independent_markers() {
        let records = [
            ScoreRecord::new("Ada", 3.0, 3.0),
            ScoreRecord::new("Bob", 3.0, 3.0),
        ];
        let scene = build_scene(&records, &CELLS);
        assert_eq!(scene.markers.len(), 2);
        assert!(scene.hover_text(0).unwrap().starts_with("Ada\n"));
        assert!(scene.hover_text(1).unwrap().starts_with("Bob\n"));
        assert!(scene.hover_text(2).is_none());
    }

    #[test]
    fn hover_text_lists_name_and_scores() {
        let scene = build_scene(&[ScoreRecord::new("Ada", 5.333, 2.1)], &CELLS);
        assert_eq!(
            scene.hover_text(0).unwrap(),
            "Ada\nHTO: 5.33\nPerformance: 2.1"
        );
    }

    #[test]
    fn cells_carry_fixed_fill_and_label_anchor() {
        let scene = build_scene(&[], &CELLS);
        let star = scene
            .cells
            .iter()
            .find(|c| Some(&c.cell) == lookup(2, 2))
            .unwrap();
        assert_eq!(star.fill, COLOR_DARK);
        assert_eq!(star.opacity, CELL_OPACITY);
        assert_eq!((star.label.x, star.label.y), (4.5, 5.5));
        assert_eq!(star.label.text, "Star");

        let enigma = &scene.cells[6];
        assert_eq!(enigma.cell.title, "Enigma");
        assert_eq!(enigma.fill, COLOR_MEDIUM);
    }

    #[test]
    fn all_markers_share_one_style() {
        assert_eq!(MARKER_STYLE.color.hex(), "#800080");
        assert_eq!((MARKER_STYLE.size, MARKER_STYLE.outline_width), (12, 1));
        assert_eq!(MARKER_STYLE.outline.hex(), "#000000");
        assert_eq!(COLOR_LIGHT.hex(), "#d9d9d9");
    }

    #[test]
    fn axes_have_gridline_every_cell_boundary() {
        let scene = build_scene(&[], &CELLS);
        assert_eq!(scene.x_axis.ticks(), vec![0.0, 2.0, 4.0, 6.0]);
        assert_eq!(scene.y_axis.ticks(), vec![0.0, 2.0, 4.0, 6.0]);
    }
}
