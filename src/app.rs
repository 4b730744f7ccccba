//! Interactive terminal front end

use crate::colors::{border_color, fill_color, text_color, ACCENT_BORDER, MUTED};
use crate::config::AppConfig;
use crate::help::{build_help, render_help_overlay};
use crate::terminal::Terminal;
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::style::Color;
use pascalart::animation::Phase;
use pascalart::colorize::{Border, Fill};
use pascalart::mode::ViewMode;
use pascalart::render::Frame;
use pascalart::session::{Action, Session};
use std::io;
use std::time::{Duration, Instant};

/// How long to block on input when no animation tick is pending
const IDLE_POLL: Duration = Duration::from_millis(100);
/// First grid row on screen
const GRID_TOP: usize = 2;
/// Columns reserved to the right of the grid for the Fibonacci chart
const CHART_WIDTH: usize = 34;
const CHART_BAR: usize = 20;
/// Canvas width used when printing a frame to stdout
const PRINT_WIDTH: u16 = 200;

/// What a keypress asks the loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    ToggleHelp,
    Session(Action),
}

fn command_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('?') => Some(Command::ToggleHelp),
        KeyCode::Char(c) if c.is_ascii_digit() => c
            .to_digit(10)
            .and_then(ViewMode::from_digit)
            .map(|mode| Command::Session(Action::SelectMode(mode))),
        KeyCode::Char('s') => Some(Command::Session(Action::Start)),
        KeyCode::Char('p') | KeyCode::Char(' ') => Some(Command::Session(Action::Pause)),
        KeyCode::Char('r') => Some(Command::Session(Action::Reset)),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::Session(Action::AdjustPrimary(-1))),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::Session(Action::AdjustPrimary(1))),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::Session(Action::AdjustSecondary(-1))),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Session(Action::AdjustSecondary(1))),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::Session(Action::AdjustRows(1))),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Command::Session(Action::AdjustRows(-1))),
        _ => None,
    }
}

/// Run the interactive view, or print one frame when configured to
pub fn run(config: AppConfig) -> io::Result<()> {
    let mut session = Session::new(config.rows, config.mode, config.params)?;

    if config.print {
        return print_frame(&session);
    }

    let mut term = Terminal::new()?;
    term.clear_screen()?;

    let mut show_help = false;
    let mut dirty = true;
    let mut next_tick: Option<Instant> = None;

    loop {
        // Check for terminal resize
        let (w, h) = term.size();
        let (new_w, new_h) = crossterm::terminal::size().unwrap_or((w, h));
        if new_w != w || new_h != h {
            term.resize(new_w, new_h);
            term.clear_screen()?;
            dirty = true;
        }

        if dirty {
            draw(&mut term, &session, show_help);
            term.present()?;
            dirty = false;
        }

        let timeout = next_tick
            .map(|t| t.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);

        if let Some((code, mods)) = term.wait_key(timeout)? {
            match command_for(code, mods) {
                Some(Command::Quit) => break,
                Some(Command::ToggleHelp) => {
                    show_help = !show_help;
                    term.clear_screen()?;
                    dirty = true;
                }
                Some(Command::Session(action)) => {
                    dirty |= session.apply(action);
                    next_tick = match session.tick_delay() {
                        Some(_) if next_tick.is_some() => next_tick,
                        Some(delay) => Some(Instant::now() + delay),
                        None => None,
                    };
                    if matches!(action, Action::SelectMode(_) | Action::AdjustRows(_)) {
                        term.clear_screen()?;
                    }
                }
                None => {}
            }
        }

        if next_tick.is_some_and(|t| Instant::now() >= t) {
            next_tick = match session.tick() {
                Some(tick) => {
                    if tick.redraw {
                        // the fractal grows and shifts, so stale cells must go
                        term.clear_screen()?;
                        dirty = true;
                    }
                    tick.delay.map(|d| Instant::now() + d)
                }
                None => None,
            };
            if next_tick.is_none() {
                dirty = true;
            }
        }
    }

    Ok(())
}

fn print_frame(session: &Session) -> io::Result<()> {
    let frame = session.frame();
    let height = GRID_TOP + frame.rows.len() + frame.captions.len() + 3;
    let mut term = Terminal::offscreen(PRINT_WIDTH, height as u16);
    draw(&mut term, session, false);
    term.print_to_stdout()
}

/// Cell geometry for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    /// Characters per cell, borders included
    cell_width: usize,
    /// Distance between the starts of neighbouring cells
    stride: usize,
    /// Values too wide to fit; cells become bare color blocks
    compact: bool,
}

impl Layout {
    /// Full-size cells when the grid and its side labels fit in `available`
    /// columns, compact blocks otherwise
    fn fit(frame: &Frame, available: usize) -> Self {
        let rows = frame.rows.len().max(1);
        let cell_width = frame.value_width() + 2;
        let stride = cell_width + 1;
        if rows * stride + label_space(frame) <= available {
            Self {
                cell_width,
                stride,
                compact: false,
            }
        } else {
            Self {
                cell_width: 2,
                stride: 2,
                compact: true,
            }
        }
    }

    fn grid_width(&self, rows: usize) -> usize {
        (rows * self.stride).saturating_sub(self.stride - self.cell_width)
    }

    /// Left edge of row `i` in a grid of `rows` rows, relative to the grid
    fn row_offset(&self, rows: usize, i: usize) -> usize {
        (rows - 1 - i) * self.stride / 2
    }
}

/// Columns the row labels take to the right of the grid, gap included
fn label_space(frame: &Frame) -> usize {
    frame
        .rows
        .iter()
        .filter_map(|row| row.label.as_ref())
        .map(|label| label.chars().count() + 2)
        .max()
        .unwrap_or(0)
}

fn draw(term: &mut Terminal, session: &Session, show_help: bool) {
    let frame = session.frame();
    let (width, height) = term.size();
    let width = width as usize;
    let mode = session.mode();

    term.clear();

    let title = format!(" Pascal's Triangle  ·  {} ", mode.label());
    term.set_str(0, 0, &title, Some(Color::White), None, true);

    let chart_space = if mode == ViewMode::Fibonacci { CHART_WIDTH } else { 0 };
    let layout = Layout::fit(&frame, width.saturating_sub(chart_space + 2));
    let rows = frame.rows.len();
    let grid_width = layout.grid_width(rows);
    let grid_left = width.saturating_sub(grid_width + chart_space + label_space(&frame)) / 2;

    for (i, row) in frame.rows.iter().enumerate() {
        let y = (GRID_TOP + i) as i32;
        let row_left = grid_left + layout.row_offset(rows, i);

        for (j, fc) in row.cells.iter().enumerate() {
            let x = (row_left + j * layout.stride) as i32;
            let bg = Some(fill_color(fc.style.fill));
            if layout.compact {
                let ch = if fc.style.border == Border::Accent { '▪' } else { ' ' };
                term.set_str(x, y, &ch.to_string().repeat(2), Some(ACCENT_BORDER), bg, false);
                continue;
            }

            let (left, right) = match fc.style.border {
                Border::Thin => (' ', ' '),
                Border::Accent => ('[', ']'),
            };
            let edge = Some(border_color(&fc.style));
            let inner = layout.cell_width - 2;
            term.set(x, y, left, edge, bg, true);
            term.set_str(
                x + 1,
                y,
                &format!("{:^width$}", fc.value, width = inner),
                Some(text_color(fc.style.fill)),
                bg,
                true,
            );
            term.set(x + 1 + inner as i32, y, right, edge, bg, true);
        }

        if let Some(label) = &row.label {
            let x = row_left + row.cells.len() * layout.stride + 1;
            term.set_str(x as i32, y, label, Some(MUTED), None, false);
        }
    }

    if !frame.chart.is_empty() {
        let max_sum = session.plan().sums().iter().copied().max().unwrap_or(1);
        draw_chart(term, &frame.chart, max_sum, grid_left + grid_width + 3);
    }

    let caption_top = GRID_TOP + rows + 1;
    for (i, caption) in frame.captions.iter().enumerate() {
        term.set_str(2, (caption_top + i) as i32, caption, Some(Color::Grey), None, false);
    }

    let status = status_line(session);
    term.set_str(0, height as i32 - 1, &status, Some(Color::DarkGrey), None, false);

    if show_help {
        render_help_overlay(term, &build_help(mode));
    }
}

fn draw_chart(term: &mut Terminal, chart: &[(usize, u64)], max_sum: u64, left: usize) {
    let x = left as i32;
    term.set_str(x, GRID_TOP as i32, "Fibonacci sums", Some(Color::White), None, true);
    for (i, &(n, sum)) in chart.iter().enumerate() {
        let y = (GRID_TOP + 1 + i) as i32;
        let bar = ((sum as u128 * CHART_BAR as u128) / max_sum.max(1) as u128) as usize;
        let line = format!("{:>2} {} {}", n, "█".repeat(bar.max(1)), sum);
        let color = fill_color(Fill::Palette(n - 1));
        term.set_str(x, y, &line, Some(color), None, false);
    }
}

fn status_line(session: &Session) -> String {
    let anim = match session.active_animation() {
        Some(anim) => {
            let phase = match anim.phase() {
                Phase::Idle => "idle",
                Phase::Playing => "playing",
                Phase::Finished => "finished",
            };
            format!("[{} {}/{}]  s start  p pause  r reset  ", phase, anim.counter(), anim.max())
        }
        None => String::new(),
    };
    format!(" 1-6 mode  {}←→ adjust  +/- rows  ? help  q quit", anim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pascalart::mode::ModeParams;

    fn session(mode: ViewMode) -> Session {
        Session::new(16, mode, ModeParams::new(16)).unwrap()
    }

    #[test]
    fn keys_map_to_actions() {
        let none = KeyModifiers::NONE;
        assert_eq!(command_for(KeyCode::Char('q'), none), Some(Command::Quit));
        assert_eq!(
            command_for(KeyCode::Char('3'), none),
            Some(Command::Session(Action::SelectMode(ViewMode::Fibonacci)))
        );
        assert_eq!(command_for(KeyCode::Char('9'), none), None);
        assert_eq!(
            command_for(KeyCode::Left, none),
            Some(Command::Session(Action::AdjustPrimary(-1)))
        );
        assert_eq!(
            command_for(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Command::Quit)
        );
        assert_eq!(
            command_for(KeyCode::Char('+'), none),
            Some(Command::Session(Action::AdjustRows(1)))
        );
        assert_eq!(
            command_for(KeyCode::Char('-'), none),
            Some(Command::Session(Action::AdjustRows(-1)))
        );
    }

    #[test]
    fn layout_falls_back_to_compact() {
        let s = session(ViewMode::RowSum);
        let frame = s.frame();
        // widest value in 16 rows is 6435
        let full = Layout::fit(&frame, 200);
        assert_eq!(full, Layout { cell_width: 6, stride: 7, compact: false });
        assert_eq!(full.grid_width(16), 16 * 7 - 1);
        assert!(Layout::fit(&frame, 60).compact);
        // 111 grid columns plus the widest label do not fit in 120
        assert!(Layout::fit(&frame, 118).compact);
        assert!(!Layout::fit(&session(ViewMode::Binomial).frame(), 118).compact);
    }

    #[test]
    fn row_labels_stay_on_screen() {
        let s = session(ViewMode::RowSum);
        for width in [80, 100, 120, 130, 160, 200] {
            let mut term = Terminal::offscreen(width, 30);
            draw(&mut term, &s, false);
            assert!(
                term.text().contains("→ sum = 32768 = 2^15"),
                "label clipped at width {}",
                width
            );
        }
    }

    #[test]
    fn rows_are_centered() {
        let layout = Layout { cell_width: 3, stride: 4, compact: false };
        assert_eq!(layout.row_offset(5, 4), 0);
        assert_eq!(layout.row_offset(5, 0), 8);
    }

    #[test]
    fn draw_shows_values_and_labels() {
        let s = session(ViewMode::RowSum);
        let mut term = Terminal::offscreen(200, 30);
        draw(&mut term, &s, false);
        let out = term.text();
        assert!(out.contains("Row sums"));
        assert!(out.contains("2^15"));
    }

    #[test]
    fn draw_fibonacci_chart() {
        let mut s = session(ViewMode::Fibonacci);
        s.apply(Action::Start);
        let mut term = Terminal::offscreen(200, 30);
        draw(&mut term, &s, false);
        let out = term.text();
        assert!(out.contains("Fibonacci sums"));
        assert!(out.contains(" 1 █ 1"));
        assert!(status_line(&s).contains("[playing 1/16]"));
    }

    #[test]
    fn status_without_animation() {
        assert_eq!(
            status_line(&session(ViewMode::Binomial)),
            " 1-6 mode  ←→ adjust  +/- rows  ? help  q quit"
        );
    }
}
