//! Plotters-powered 9-box chart widget for Ratatui.
//!
//! The widget only draws geometry (shaded cells, gridlines, markers). Text
//! (cell titles, tick labels, hover tooltip) is laid out by the caller with
//! Ratatui widgets, which stay crisp at terminal resolution.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color as TuiColor, Style},
    widgets::Widget,
};

use crate::scene::{Rgb, Scene};

/// Gridline color (CSS `lightgrey`).
const GRID_COLOR: RGBColor = RGBColor(0xd3, 0xd3, 0xd3);
/// Color of the marker under the hover cursor.
const FOCUS_COLOR: RGBColor = RGBColor(255, 255, 0);

/// A render-only view of a scene.
pub struct NineBoxChart<'a> {
    pub scene: &'a Scene,
    /// Index of the hovered marker, if any.
    pub focused: Option<usize>,
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

impl<'a> Widget for NineBoxChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(TuiColor::Yellow),
            );
            return;
        }

        let scene = self.scene;
        let focused = self.focused;
        let x = scene.x_axis;
        let y = scene.y_axis;
        let marker_color = rgb(scene.marker_style.color);

        let widget = widget_fn(move |root| {
            // No margins or label areas: the caller maps display coordinates
            // onto `area` linearly to place titles and ticks.
            let mut chart = ChartBuilder::on(&root)
                .margin(0)
                .build_cartesian_2d(x.min..x.max, y.min..y.max)?;

            // 1) Shaded background cells.
            chart.draw_series(scene.cells.iter().map(|c| {
                Rectangle::new(
                    [(c.bounds.x0, c.bounds.y0), (c.bounds.x1, c.bounds.y1)],
                    rgb(c.fill).mix(c.opacity).filled(),
                )
            }))?;

            // 2) Gridlines at every cell boundary.
            chart.draw_series(x.ticks().into_iter().map(|t| {
                PathElement::new(vec![(t, y.min), (t, y.max)], GRID_COLOR.stroke_width(1))
            }))?;
            chart.draw_series(y.ticks().into_iter().map(|t| {
                PathElement::new(vec![(x.min, t), (x.max, t)], GRID_COLOR.stroke_width(1))
            }))?;

            // 3) Markers inside the window, focused one last so it stays on top.
            //
            // `Circle` radii are mis-scaled by the ratatui backend, so markers
            // are single pixels.
            chart.draw_series(
                scene
                    .visible_markers()
                    .filter(|(idx, _)| Some(*idx) != focused)
                    .map(|(_, m)| Pixel::new((m.x, m.y), marker_color)),
            )?;
            chart.draw_series(
                scene
                    .visible_markers()
                    .filter(|(idx, _)| Some(*idx) == focused)
                    .map(|(_, m)| Pixel::new((m.x, m.y), FOCUS_COLOR)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
