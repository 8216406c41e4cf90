//! Character-cell rendering of a `Scene` for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks when piping `ninebox plot` somewhere
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - cell shading by tier: `.` light, `:` medium, `#` dark
//! - gridlines at every cell boundary: `|`, `-`, `+`
//! - truncated cell titles
//! - markers: `o`, or the count (`2`..`9`, then `*`) where several share a spot
//!
//! Markers outside the display window are not drawn (the window clips them).

use crate::domain::Tier;
use crate::scene::{Axis, Scene};

/// Render `scene` into a `width` × `height` character grid with a header line.
pub fn render_ascii_scene(scene: &Scene, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let mut grid = vec![vec![' '; width]; height];

    shade_cells(&mut grid, scene);
    draw_gridlines(&mut grid, scene);
    draw_labels(&mut grid, scene);
    draw_markers(&mut grid, scene);

    let visible = scene.visible_markers().count();
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {}=[{}, {}] | {}=[{}, {}] | markers={} ({} outside window)\n",
        scene.x_axis.title,
        scene.x_axis.min,
        scene.x_axis.max,
        scene.y_axis.title,
        scene.y_axis.min,
        scene.y_axis.max,
        scene.markers.len(),
        scene.markers.len() - visible,
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn tier_char(tier: Tier) -> char {
    match tier {
        Tier::Light => '.',
        Tier::Medium => ':',
        Tier::Dark => '#',
    }
}

fn shade_cells(grid: &mut [Vec<char>], scene: &Scene) {
    let height = grid.len();
    let width = grid[0].len();

    for (row, line) in grid.iter_mut().enumerate() {
        let y = unmap_y(row, &scene.y_axis, height);
        for (col, ch) in line.iter_mut().enumerate() {
            let x = unmap_x(col, &scene.x_axis, width);
            let hit = scene.cells.iter().find(|c| {
                x >= c.bounds.x0 && x <= c.bounds.x1 && y >= c.bounds.y0 && y <= c.bounds.y1
            });
            if let Some(shape) = hit {
                *ch = tier_char(shape.cell.tier);
            }
        }
    }
}

fn draw_gridlines(grid: &mut [Vec<char>], scene: &Scene) {
    let height = grid.len();
    let width = grid[0].len();

    let cols: Vec<usize> = scene
        .x_axis
        .ticks()
        .into_iter()
        .filter_map(|t| map_x(t, &scene.x_axis, width))
        .collect();
    let rows: Vec<usize> = scene
        .y_axis
        .ticks()
        .into_iter()
        .filter_map(|t| map_y(t, &scene.y_axis, height))
        .collect();

    for &row in &rows {
        for ch in grid[row].iter_mut() {
            *ch = '-';
        }
    }
    for line in grid.iter_mut() {
        for &col in &cols {
            line[col] = '|';
        }
    }
    for &row in &rows {
        for &col in &cols {
            grid[row][col] = '+';
        }
    }
}

fn draw_labels(grid: &mut [Vec<char>], scene: &Scene) {
    let height = grid.len();
    let width = grid[0].len();

    for shape in &scene.cells {
        let (Some(col), Some(row)) = (
            map_x(shape.label.x, &scene.x_axis, width),
            map_y(shape.label.y, &scene.y_axis, height),
        ) else {
            continue;
        };
        // Stop before the cell's right edge so titles never cross a gridline.
        let end = map_x(shape.bounds.x1, &scene.x_axis, width).unwrap_or(width);
        for (c, ch) in (col..end).zip(shape.label.text.chars()) {
            grid[row][c] = ch;
        }
    }
}

fn draw_markers(grid: &mut [Vec<char>], scene: &Scene) {
    let height = grid.len();
    let width = grid[0].len();
    let mut counts = vec![vec![0usize; width]; height];

    for (_, m) in scene.visible_markers() {
        let (Some(col), Some(row)) = (
            map_x(m.x, &scene.x_axis, width),
            map_y(m.y, &scene.y_axis, height),
        ) else {
            continue;
        };
        counts[row][col] += 1;
        grid[row][col] = match counts[row][col] {
            1 => 'o',
            n @ 2..=9 => char::from_digit(n as u32, 10).unwrap_or('*'),
            _ => '*',
        };
    }
}

fn map_x(v: f64, axis: &Axis, width: usize) -> Option<usize> {
    if !axis.contains(v) {
        return None;
    }
    let u = (v - axis.min) / (axis.max - axis.min);
    Some((u * (width as f64 - 1.0)).round() as usize)
}

fn map_y(v: f64, axis: &Axis, height: usize) -> Option<usize> {
    if !axis.contains(v) {
        return None;
    }
    let u = (v - axis.min) / (axis.max - axis.min);
    // y=top is max -> row 0
    Some((height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize)
}

fn unmap_x(col: usize, axis: &Axis, width: usize) -> f64 {
    axis.min + col as f64 / (width as f64 - 1.0) * (axis.max - axis.min)
}

fn unmap_y(row: usize, axis: &Axis, height: usize) -> f64 {
    axis.max - row as f64 / (height as f64 - 1.0) * (axis.max - axis.min)
}
