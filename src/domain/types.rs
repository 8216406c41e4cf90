//! Shared domain types.
//!
//! These types are intentionally small and `Copy` where possible: a render pass
//! creates records, builds a scene from them, and throws both away when the
//! next file is opened.

use std::path::PathBuf;

use serde::Deserialize;

/// Lower edge of the fixed display window (both axes).
pub const AXIS_MIN: f64 = 0.0;
/// Upper edge of the fixed display window (both axes).
pub const AXIS_MAX: f64 = 6.0;
/// Width/height of one cell in display units.
pub const CELL_SIZE: f64 = 2.0;
/// Number of cells along each axis.
pub const GRID_DIM: usize = 3;

/// Source column holding the display name.
pub const NAME_COLUMN: &str = "Name";
/// Source column holding the axis-A score.
pub const HTO_COLUMN: &str = "HTO";
/// Source column holding the axis-B score.
pub const PERFORMANCE_COLUMN: &str = "Performance";

/// Columns every uploaded table must carry (extra columns are ignored).
pub const REQUIRED_COLUMNS: [&str; 3] = [NAME_COLUMN, HTO_COLUMN, PERFORMANCE_COLUMN];

/// One person's scores, as read from an uploaded table.
///
/// Scores are kept exactly as read; the scene rounds them for display and
/// nothing branches on their values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "HTO")]
    pub hto: f64,
    #[serde(rename = "Performance")]
    pub performance: f64,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, hto: f64, performance: f64) -> Self {
        Self {
            name: name.into(),
            hto,
            performance,
        }
    }
}

/// Round to 2 decimal places, ties to even.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

/// Visual intensity of a background cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Light,
    Medium,
    Dark,
}

/// `(i, j)` position of a cell: `i` is the HTO tier, `j` the Performance tier,
/// both `0 = low`, `1 = mid`, `2 = high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex {
    pub i: u8,
    pub j: u8,
}

impl CellIndex {
    /// Returns `None` when either component is outside `0..3`.
    pub const fn new(i: u8, j: u8) -> Option<Self> {
        if (i as usize) < GRID_DIM && (j as usize) < GRID_DIM {
            Some(Self { i, j })
        } else {
            None
        }
    }

    /// Position in the cell table (row-major by Performance tier).
    pub const fn slot(self) -> usize {
        self.j as usize * GRID_DIM + self.i as usize
    }
}

/// Axis-aligned rectangle in display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl Bounds {
    pub fn for_index(index: CellIndex) -> Self {
        let i = f64::from(index.i);
        let j = f64::from(index.j);
        Self {
            x0: i * CELL_SIZE,
            x1: (i + 1.0) * CELL_SIZE,
            y0: j * CELL_SIZE,
            y1: (j + 1.0) * CELL_SIZE,
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True when the open interiors of `self` and `other` intersect.
    pub fn interiors_overlap(&self, other: &Bounds) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }
}

/// One of the nine fixed background regions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub index: CellIndex,
    pub title: &'static str,
    pub description: &'static str,
    pub tier: Tier,
}

impl Cell {
    pub fn bounds(&self) -> Bounds {
        Bounds::for_index(self.index)
    }

    /// 1-based number shown in front of the title in the legend.
    pub fn ordinal(&self) -> usize {
        self.index.slot() + 1
    }
}

/// Resolved settings for one dashboard session.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// File opened before the first frame, if any.
    pub initial_file: Option<PathBuf>,
    /// Where the open dialog looks for score files.
    pub search_root: PathBuf,
    pub search_depth: usize,
}
