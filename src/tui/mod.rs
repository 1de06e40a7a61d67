//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for accuracy, panel range, calibration
//! method and simulation trials, then renders the exact curve, the affine
//! approximation and (optionally) simulated rates.

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{RunOutput, run_curve};
use crate::domain::RunConfig;
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::GuessChart;

const FIELD_COUNT: usize = 4;
const Q_STEP: f64 = 0.01;
const TRIALS_STEP: u64 = 1_000;
const DEBUG_DIR: &str = "debug";

/// Start the TUI.
pub fn run(config: RunConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config);
    app.recompute();
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

struct App {
    config: RunConfig,
    selected_field: usize,
    simulate: bool,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(config: RunConfig) -> Self {
        Self {
            config,
            selected_field: 0,
            simulate: false,
            status: String::new(),
            run: None,
        }
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
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
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

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELD_COUNT {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('m') => {
                self.config.method = self.config.method.next();
                self.recompute();
            }
            KeyCode::Char('s') => {
                self.simulate = !self.simulate;
                self.recompute();
            }
            KeyCode::Char('r') => {
                self.config.seed = self.config.seed.wrapping_add(1);
                if self.simulate {
                    self.recompute();
                }
                self.status = format!("seed: {}", self.config.seed);
            }
            KeyCode::Char('d') => {
                self.status = match crate::debug::write_debug_bundle(Path::new(DEBUG_DIR), &self.config) {
                    Ok(path) => format!("Wrote debug bundle: {}", path.display()),
                    Err(err) => format!("Debug write failed: {err}"),
                };
            }
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            0 => {
                let q = self.config.q + f64::from(delta) * Q_STEP;
                // Round to the step grid so repeated presses don't accumulate drift.
                self.config.q = ((q / Q_STEP).round() * Q_STEP).clamp(0.0, 1.0);
            }
            1 => {
                self.config.n_max = if delta >= 0 {
                    self.config.n_max.saturating_add(1).min(crate::models::MAX_SIGNALS)
                } else {
                    self.config.n_max.saturating_sub(1).max(2)
                };
            }
            2 => {
                self.config.method = self.config.method.next();
            }
            3 => {
                self.config.trials = if delta >= 0 {
                    self.config.trials.saturating_add(TRIALS_STEP)
                } else {
                    self.config.trials.saturating_sub(TRIALS_STEP).max(TRIALS_STEP)
                };
            }
            _ => {}
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        match run_curve(&self.config, self.simulate) {
            Ok(run) => {
                self.status = format!(
                    "max |approx - exact| = {:.4} at n={}",
                    run.summary.max_abs_error, run.summary.worst_n
                );
                self.run = Some(run);
            }
            Err(err) => {
                self.status = err.to_string();
                self.run = None;
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("sg", Style::default().fg(Color::Cyan)),
            Span::raw(" - majority-vote correct-guess probability"),
        ]));

        if let Some(run) = &self.run {
            lines.push(Line::from(Span::styled(
                format!(
                    "q={:.2} | approx ({}) = {}",
                    self.config.q,
                    self.config.method.display_name(),
                    crate::report::fmt_affine(&run.curve.approx),
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(FIELD_COUNT as u16 + 3)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("P(correct) vs n").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("No curve (check settings).")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let series = chart_series(run);
        let widget = GuessChart {
            exact: &series.exact,
            approx: &series.approx,
            simulated: &series.simulated,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let sim_label = if self.simulate { "on" } else { "off" };
        let items = vec![
            ListItem::new(format!("q: {:.2}", self.config.q)),
            ListItem::new(format!("n max: {}", self.config.n_max)),
            ListItem::new(format!("Method: {}", self.config.method.display_name())),
            ListItem::new(format!(
                "Trials: {} (simulation {sim_label}, seed {})",
                self.config.trials, self.config.seed
            )),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  m method  s simulate  r reseed  d debug  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Plot-ready series for one run.
#[derive(Debug, Clone, PartialEq)]
struct ChartSeries {
    exact: Vec<(f64, f64)>,
    approx: Vec<(f64, f64)>,
    simulated: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

fn chart_series(run: &RunOutput) -> ChartSeries {
    let exact: Vec<(f64, f64)> = run
        .curve
        .rows
        .iter()
        .map(|r| (f64::from(r.n), r.exact))
        .collect();

    let (n0, n1) = match (run.curve.rows.first(), run.curve.rows.last()) {
        (Some(first), Some(last)) if last.n > first.n => (first.n, last.n),
        _ => (0, 1),
    };
    let approx = vec![
        (f64::from(n0), run.curve.approx.eval(n0)),
        (f64::from(n1), run.curve.approx.eval(n1)),
    ];

    let simulated: Vec<(f64, f64)> = run
        .simulation
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|s| (f64::from(s.n), s.rate))
        .collect();

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in exact.iter().chain(&approx).chain(&simulated) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

    ChartSeries {
        exact,
        approx,
        simulated,
        x_bounds: [f64::from(n0), f64::from(n1)],
        y_bounds: [y_min - pad, y_max + pad],
    }
}
