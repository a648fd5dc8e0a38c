//! # Toroid Life
//!
//! A terminal viewer for the toroidal tri-state grid, using `ratatui` for the
//! interface and `crossterm` for terminal manipulation.
//!
//! ## Usage
//!
//! ```text
//! toroid-life [rows] [cols] [seed]
//! ```
//!
//! The grid is randomized on start and on demand. Cells can be toggled
//! between empty and alive under the cursor, and the neighbor count of every
//! cell can be shown in place of the cells themselves.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use rand::{rngs::StdRng, SeedableRng};
use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};
use sysinfo::{System, SystemExt};
use toroid_life::{Cell, CellCounts, Grid, GridError, SymbolMap, ViewerConfig};

/// Main application state for the viewer.
#[derive(Debug)]
struct App {
    /// The grid being displayed
    grid: Grid,
    /// Random source for resets
    rng: StdRng,
    config: ViewerConfig,
    /// Cursor position as `(row, col)`
    cursor: (usize, usize),
    /// Show neighbor counts instead of cells
    show_counts: bool,
    /// Number of resets since start, including the initial one
    resets: u64,
    /// Cell counts as of the last change
    counts: CellCounts,
    /// System information for resource monitoring
    sys: System,
}

impl App {
    /// Creates the viewer and randomizes the grid once.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured dimensions are out of range.
    fn new(config: ViewerConfig) -> Result<App, GridError> {
        let grid = Grid::new(config.rows, config.cols)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut app = App {
            grid,
            rng,
            config,
            cursor: (0, 0),
            show_counts: false,
            resets: 0,
            counts: CellCounts::default(),
            sys: System::new_all(),
        };
        app.reset();
        Ok(app)
    }

    /// Re-randomizes every cell with the configured probabilities.
    fn reset(&mut self) {
        self.grid.reset(
            &mut self.rng,
            self.config.live_probability,
            self.config.wall_probability,
        );
        self.resets += 1;
        self.counts = self.grid.population();
        self.sys.refresh_memory();
    }

    /// Flips the cell under the cursor between empty and alive.
    ///
    /// A wall under the cursor becomes alive.
    fn toggle_cursor_cell(&mut self) -> Result<(), GridError> {
        let (row, col) = self.cursor;
        let next = match self.grid.cell(row, col)? {
            Cell::Alive => Cell::Empty,
            Cell::Empty | Cell::Wall => Cell::Alive,
        };
        self.grid.set(row, col, next)?;
        self.counts = self.grid.population();
        Ok(())
    }

    /// Moves the cursor, wrapping at the edges like the grid does.
    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let (row, col) = self.cursor;
        self.cursor = (
            toroid_life::wrap(row as isize + d_row, self.grid.rows()),
            toroid_life::wrap(col as isize + d_col, self.grid.cols()),
        );
    }

    /// One text line per grid row, cells or neighbor counts.
    fn grid_lines(&self) -> Result<Vec<String>, GridError> {
        if self.show_counts {
            return Ok(self
                .grid
                .neighbor_count_map()
                .iter()
                .map(|row| row.iter().map(|count| count.to_string()).collect())
                .collect());
        }

        let symbols = SymbolMap::empty()
            .with(Cell::Wall, "#")
            .with(Cell::Empty, " ")
            .with(Cell::Alive, "•");
        self.grid.render(&symbols, "")
    }
}

/// Draws the grid, highlighting the cursor cell.
fn draw_grid(f: &mut ratatui::Frame, app: &App, lines: Vec<String>, area: Rect) {
    let title = if app.show_counts {
        "Neighbor counts [r: Reset | n: Cells | Space: Toggle | Arrows: Move | q: Quit]"
    } else {
        "Toroid Life [r: Reset | n: Counts | Space: Toggle | Arrows: Move | q: Quit]"
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let (cursor_row, cursor_col) = app.cursor;
    let text: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .map(|(row, line)| {
            let spans: Vec<Span> = line
                .chars()
                .enumerate()
                .map(|(col, ch)| {
                    let style = if (row, col) == (cursor_row, cursor_col) {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default()
                    };
                    Span::styled(ch.to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .block(block);

    f.render_widget(paragraph, area);
}

/// Draws the statistics panel.
fn draw_stats(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let memory_used = app.sys.used_memory() / 1024; // Convert to KB
    let memory_total = app.sys.total_memory() / 1024;

    let (row, col) = app.cursor;
    let cursor_cell = app
        .grid
        .cell(row, col)
        .map(|cell| format!("{:?}", cell))
        .unwrap_or_default();
    let cursor_count = app.grid.neighbor_count(row, col).unwrap_or_default();

    let stats_text = format!(
        "Statistics:\n\
        Grid: {}x{}\n\
        Resets: {}\n\
        Alive: {}\n\
        Empty: {}\n\
        Walls: {}\n\
        Cursor: ({}, {}) {}\n\
        Neighbors: {}\n\
        Memory Usage: {}KB/{:.2}MB\n",
        app.grid.rows(),
        app.grid.cols(),
        app.resets,
        app.counts.alive,
        app.counts.empty,
        app.counts.walls,
        row,
        col,
        cursor_cell,
        cursor_count,
        memory_used,
        memory_total as f64 / 1024.0,
    );

    let stats_widget = Paragraph::new(stats_text)
        .block(Block::default().borders(Borders::ALL).title("Statistics"))
        .wrap(Wrap { trim: true });

    f.render_widget(stats_widget, area);
}

/// Sets up the terminal, runs the event loop and restores the terminal.
///
/// # Controls
///
/// * r: Randomize the grid
/// * n: Switch between cells and neighbor counts
/// * Space: Toggle the cursor cell
/// * Arrows: Move the cursor
/// * q: Quit the application
///
/// # Errors
///
/// Returns an error if the arguments are invalid or terminal manipulation fails.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = ViewerConfig::from_args(std::env::args().skip(1))?;
    log::info!(
        "Starting {}x{} viewer (seed: {:?})",
        config.rows,
        config.cols,
        config.seed
    );
    let tick_rate = config.tick_rate;
    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, tick_rate);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<(), Box<dyn Error>> {
    let mut last_tick = Instant::now();

    loop {
        let lines = app.grid_lines()?;
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
                .split(f.size());

            draw_grid(f, app, lines, chunks[0]);
            draw_stats(f, app, chunks[1]);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('r') => app.reset(),
                    KeyCode::Char('n') => app.show_counts = !app.show_counts,
                    KeyCode::Char(' ') => app.toggle_cursor_cell()?,
                    KeyCode::Up => app.move_cursor(-1, 0),
                    KeyCode::Down => app.move_cursor(1, 0),
                    KeyCode::Left => app.move_cursor(0, -1),
                    KeyCode::Right => app.move_cursor(0, 1),
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.sys.refresh_memory();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
