//! Ratatui-based terminal dashboard.
//!
//! The dashboard shows the 9-box chart for the currently opened file, a hover
//! panel for the focused marker, and the quadrant legend. An open dialog lists
//! the `.csv` / `.xlsx` files found under the working directory.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::pipeline::DashboardState;
use crate::cli::picker::{discover_score_files, pretty_path};
use crate::domain::{CELLS, DashboardConfig};
use crate::error::AppError;
use crate::scene::{Axis, Scene};

mod plotters_chart;

use plotters_chart::NineBoxChart;

/// Start the TUI.
pub fn run(config: DashboardConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Dashboard,
    Picker,
}

/// Open-dialog state.
#[derive(Debug, Default)]
struct Picker {
    files: Vec<PathBuf>,
    selected: usize,
    /// Typed path; takes precedence over the list when non-empty.
    input: String,
}

impl Picker {
    fn choice(&self) -> Option<PathBuf> {
        let typed = self.input.trim();
        if !typed.is_empty() {
            return Some(PathBuf::from(typed));
        }
        self.files.get(self.selected).cloned()
    }
}

struct App {
    config: DashboardConfig,
    state: DashboardState,
    /// Marker under the hover cursor.
    hover: Option<usize>,
    mode: Mode,
    picker: Picker,
    status: String,
}

impl App {
    fn new(config: DashboardConfig) -> Self {
        let mut app = Self {
            config,
            state: DashboardState::Empty,
            hover: None,
            mode: Mode::Dashboard,
            picker: Picker::default(),
            status: "Press o to open a score file.".to_string(),
        };
        if let Some(path) = app.config.initial_file.clone() {
            app.open(&path);
        }
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.mode == Mode::Picker {
            self.handle_picker_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('o') => self.open_picker(),
            KeyCode::Char('r') => {
                if let Some(path) = self.current_source() {
                    self.open(&path);
                }
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Down => self.move_hover(1),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Up => self.move_hover(-1),
            KeyCode::Esc => self.hover = None,
            _ => {}
        }
        false
    }

    fn handle_picker_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.mode = Mode::Dashboard;
                self.status = "Open canceled.".to_string();
            }
            KeyCode::Up => {
                self.picker.selected = self.picker.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.picker.selected + 1 < self.picker.files.len() {
                    self.picker.selected += 1;
                }
            }
            KeyCode::Enter => match self.picker.choice() {
                Some(path) => {
                    self.mode = Mode::Dashboard;
                    self.open(&path);
                }
                None => {
                    self.status = "No file selected. Type a path or press Esc.".to_string();
                }
            },
            KeyCode::Backspace => {
                self.picker.input.pop();
            }
            KeyCode::Char(c) => self.picker.input.push(c),
            _ => {}
        }
    }

    fn open_picker(&mut self) {
        self.picker = Picker {
            files: discover_score_files(&self.config.search_root, self.config.search_depth),
            selected: 0,
            input: String::new(),
        };
        self.mode = Mode::Picker;
        self.status = format!("{} score file(s) found.", self.picker.files.len());
    }

    /// Run a render pass and replace whatever was shown before.
    fn open(&mut self, path: &Path) {
        self.state.open(path);
        self.hover = None;
        self.status = match &self.state {
            DashboardState::Ready(output) => format!(
                "Loaded {} record(s) from {}.",
                output.scene.markers.len(),
                pretty_path(&output.source)
            ),
            DashboardState::Failed { error, .. } => {
                format!("Render failed ({}). Press o to open another file.", error.kind())
            }
            DashboardState::Empty => String::new(),
        };
    }

    fn current_source(&self) -> Option<PathBuf> {
        match &self.state {
            DashboardState::Ready(output) => Some(output.source.clone()),
            DashboardState::Failed { source, .. } => Some(source.clone()),
            DashboardState::Empty => None,
        }
    }

    fn move_hover(&mut self, delta: isize) {
        let n = self.state.scene().map_or(0, |s| s.markers.len());
        self.hover = step_hover(self.hover, delta, n);
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(11),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        draw_legend(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);

        if self.mode == Mode::Picker {
            self.draw_picker(frame, size);
        }
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let source = self
            .current_source()
            .map(|p| pretty_path(&p))
            .unwrap_or_else(|| "-".to_string());
        let line = Line::from(vec![
            Span::styled("9-Box Talent Matrix Dashboard", Style::default().fg(Color::Cyan)),
            Span::styled(format!(" | file: {source}"), Style::default().fg(Color::Gray)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(34)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_hover(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("9-Box Talent Matrix").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let output = match &self.state {
            DashboardState::Empty => {
                let msg = Paragraph::new("Open a .csv or .xlsx file to visualize your matrix (press o).")
                    .style(Style::default().fg(Color::Cyan))
                    .wrap(Wrap { trim: true });
                frame.render_widget(msg, inner);
                return;
            }
            DashboardState::Failed { source, error } => {
                let text = Text::from(vec![
                    Line::from(Span::styled(
                        error.to_string(),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("file: {}", pretty_path(source)),
                        Style::default().fg(Color::Gray),
                    )),
                ]);
                frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
                return;
            }
            DashboardState::Ready(output) => output,
        };

        let scene = &output.scene;
        let (chart_rect, insets) = chart_layout(inner);
        frame.render_widget(
            NineBoxChart {
                scene,
                focused: self.hover,
            },
            chart_rect,
        );
        draw_cell_titles(frame, chart_rect, scene);
        draw_focus(frame, chart_rect, scene, self.hover);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, &scene.x_axis, &scene.y_axis);
        }
    }

    fn draw_hover(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Hover").borders(Borders::ALL);
        let Some(scene) = self.state.scene() else {
            frame.render_widget(block, area);
            return;
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(inner);

        let tooltip = match self.hover.and_then(|idx| scene.hover_text(idx)) {
            Some(text) => Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
            None => Paragraph::new("Tab / arrows to inspect points.")
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true }),
        };
        frame.render_widget(tooltip, chunks[0]);

        let visible: Vec<bool> = scene
            .markers
            .iter()
            .map(|m| scene.x_axis.contains(m.x) && scene.y_axis.contains(m.y))
            .collect();
        let items: Vec<ListItem> = scene
            .markers
            .iter()
            .zip(visible)
            .map(|(m, inside)| {
                if inside {
                    ListItem::new(m.name.clone())
                } else {
                    ListItem::new(format!("{} (outside window)", m.name))
                        .style(Style::default().fg(Color::DarkGray))
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title(format!("Points ({})", scene.markers.len())))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Yellow))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(self.hover);
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "o open  r reload  Tab/←/→ hover  Esc clear  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_picker(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let popup = centered_rect(area, 70, 60);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title("Open score file (.csv / .xlsx)")
            .borders(Borders::ALL);
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(inner);

        let items: Vec<ListItem> = self
            .picker
            .files
            .iter()
            .map(|p| ListItem::new(pretty_path(p)))
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = ListState::default();
        if !self.picker.files.is_empty() && self.picker.input.trim().is_empty() {
            state.select(Some(self.picker.selected));
        }
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let prompt = Text::from(vec![
            Line::from(format!("path: {}_", self.picker.input)),
            Line::from(Span::styled(
                "↑/↓ select  type a path  Enter open  Esc cancel",
                Style::default().fg(Color::Gray),
            )),
        ]);
        frame.render_widget(Paragraph::new(prompt), chunks[1]);
    }
}

/// Move the hover cursor by `delta`, wrapping around `n` markers.
fn step_hover(current: Option<usize>, delta: isize, n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let next = match current {
        None if delta >= 0 => 0,
        None => n - 1,
        Some(idx) => (idx as isize + delta).rem_euclid(n as isize) as usize,
    };
    Some(next)
}

fn draw_legend(frame: &mut ratatui::Frame<'_>, area: Rect) {
    let items: Vec<ListItem> = CELLS
        .iter()
        .map(|cell| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{}. {}", cell.ordinal(), cell.title),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" – {}", cell.description)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(crate::report::LEGEND_TITLE)
            .borders(Borders::ALL),
    );
    frame.render_widget(list, area);
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 4,
        right: 1,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

/// Terminal cell for a display coordinate, `None` outside the window.
fn to_screen(chart: Rect, x_axis: &Axis, y_axis: &Axis, x: f64, y: f64) -> Option<(u16, u16)> {
    if !x_axis.contains(x) || !y_axis.contains(y) || chart.width == 0 || chart.height == 0 {
        return None;
    }
    let u = (x - x_axis.min) / (x_axis.max - x_axis.min);
    let v = (y - y_axis.min) / (y_axis.max - y_axis.min);
    let col = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
    let row = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * v).round() as u16;
    Some((col, row))
}

fn draw_cell_titles(frame: &mut ratatui::Frame<'_>, chart: Rect, scene: &Scene) {
    let style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    for shape in &scene.cells {
        let Some((col, row)) = to_screen(chart, &scene.x_axis, &scene.y_axis, shape.label.x, shape.label.y)
        else {
            continue;
        };
        let right = to_screen(chart, &scene.x_axis, &scene.y_axis, shape.bounds.x1, shape.label.y)
            .map_or(chart.x + chart.width, |(c, _)| c);
        let width = right.saturating_sub(col);
        if width == 0 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(shape.label.text).style(style),
            Rect {
                x: col,
                y: row,
                width,
                height: 1,
            },
        );
    }
}

fn draw_focus(frame: &mut ratatui::Frame<'_>, chart: Rect, scene: &Scene, hover: Option<usize>) {
    let Some(marker) = hover.and_then(|idx| scene.markers.get(idx)) else {
        return;
    };
    let Some((col, row)) = to_screen(chart, &scene.x_axis, &scene.y_axis, marker.x, marker.y) else {
        return;
    };
    frame.render_widget(
        Paragraph::new("●").style(Style::default().fg(Color::Yellow)),
        Rect {
            x: col,
            y: row,
            width: 1,
            height: 1,
        },
    );
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_axis: &Axis,
    y_axis: &Axis,
) {
    let style = Style::default().fg(Color::Gray);

    for t in x_axis.ticks() {
        let Some((x, _)) = to_screen(chart, x_axis, y_axis, t, y_axis.min) else {
            continue;
        };
        let label = format!("{t:.0}");
        let label_len = label.len() as u16;
        let start = x.saturating_sub(label_len / 2);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for t in y_axis.ticks() {
        let Some((_, y)) = to_screen(chart, x_axis, y_axis, x_axis.min, t) else {
            continue;
        };
        let label = format!("{t:.0}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new(x_axis.title)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(y_axis.title)
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width.min(y_axis.title.len() as u16),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
