//! The fixed 9-box cell table.
//!
//! Titles and tiers are a lookup, not a function of the scores: the table is
//! built at compile time and never mutated.

use super::types::{Cell, CellIndex, Tier};

const fn cell(i: u8, j: u8, title: &'static str, description: &'static str, tier: Tier) -> Cell {
    Cell {
        index: CellIndex { i, j },
        title,
        description,
        tier,
    }
}

/// All nine cells, ordered by `CellIndex::slot` (low Performance row first).
pub static CELLS: [Cell; 9] = [
    cell(0, 0, "Question & Develop", "Low HTO & Performance.", Tier::Light),
    cell(1, 0, "Solid Contributor", "Average HTO, low performance.", Tier::Light),
    cell(2, 0, "Good Performer", "High HTO, low performance.", Tier::Medium),
    cell(0, 1, "Out of Focus", "Low HTO, average performance.", Tier::Light),
    cell(1, 1, "Core Player", "Average HTO & performance.", Tier::Medium),
    cell(2, 1, "High Impact", "High HTO, good performance.", Tier::Dark),
    cell(0, 2, "Enigma", "Low HTO, high performance.", Tier::Medium),
    cell(1, 2, "High Potential", "Average HTO, high performance.", Tier::Dark),
    cell(2, 2, "Star", "High HTO & high performance.", Tier::Dark),
];

/// Look up the cell at `index`.
pub fn cell_at(index: CellIndex) -> &'static Cell {
    &CELLS[index.slot()]
}

/// Look up a cell by raw `(i, j)`; `None` outside the 3×3 grid.
pub fn lookup(i: u8, j: u8) -> Option<&'static Cell> {
    CellIndex::new(i, j).map(cell_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{AXIS_MAX, AXIS_MIN, Bounds};

    #[test]
    fn every_pair_has_exactly_one_cell() {
        for i in 0..3u8 {
            for j in 0..3u8 {
                let hits = CELLS
                    .iter()
                    .filter(|c| c.index == CellIndex { i, j })
                    .count();
                assert_eq!(hits, 1, "({i},{j}) appears {hits} times");
            }
        }
    }

    #[test]
    fn titles_and_tiers_match_reference_table() {
        let expected = [
            ((0, 0), "Question & Develop", Tier::Light),
            ((1, 0), "Solid Contributor", Tier::Light),
            ((2, 0), "Good Performer", Tier::Medium),
            ((0, 1), "Out of Focus", Tier::Light),
            ((1, 1), "Core Player", Tier::Medium),
            ((2, 1), "High Impact", Tier::Dark),
            ((0, 2), "Enigma", Tier::Medium),
            ((1, 2), "High Potential", Tier::Dark),
            ((2, 2), "Star", Tier::Dark),
        ];
        for ((i, j), title, tier) in expected {
            let c = lookup(i, j).unwrap();
            assert_eq!(c.title, title);
            assert_eq!(c.tier, tier, "tier mismatch for {title}");
        }
    }

    #[test]
    fn titles_are_unique() {
        for (a_idx, a) in CELLS.iter().enumerate() {
            for b in CELLS.iter().skip(a_idx + 1) {
                assert_ne!(a.title, b.title);
            }
        }
    }

    #[test]
    fn bounds_tile_the_display_window() {
        let bounds: Vec<Bounds> = CELLS.iter().map(Cell::bounds).collect();

        for (a_idx, a) in bounds.iter().enumerate() {
            for b in bounds.iter().skip(a_idx + 1) {
                assert!(!a.interiors_overlap(b), "{a:?} overlaps {b:?}");
            }
            assert!(a.x0 >= AXIS_MIN && a.x1 <= AXIS_MAX);
            assert!(a.y0 >= AXIS_MIN && a.y1 <= AXIS_MAX);
        }

        // Disjoint interiors inside the window + full total area => exact cover.
        let total: f64 = bounds.iter().map(Bounds::area).sum();
        let window = (AXIS_MAX - AXIS_MIN) * (AXIS_MAX - AXIS_MIN);
        assert!((total - window).abs() < 1e-12);
    }

    #[test]
    fn lookup_is_pure() {
        let first = lookup(0, 2).copied();
        let second = lookup(0, 2).copied();
        assert_eq!(first, second);
        assert_eq!(first.map(|c| c.tier), Some(Tier::Medium));
    }

    #[test]
    fn lookup_outside_grid_is_none() {
        assert!(lookup(3, 1).is_none());
    }

    #[test]
    fn ordinals_follow_legend_order() {
        let ordinals: Vec<usize> = CELLS.iter().map(Cell::ordinal).collect();
        assert_eq!(ordinals, (1..=9).collect::<Vec<_>>());
    }
}
