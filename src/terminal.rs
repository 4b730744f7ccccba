use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyModifiers},
    execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Terminal abstraction with a back buffer
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    alternate_screen: bool,
}

/// A single cell in the terminal buffer
#[derive(Clone, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
            bold: false,
        }
    }
}

impl Terminal {
    /// Take over the real terminal: raw mode, alternate screen, hidden cursor
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;

        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide)?;

        Ok(Self {
            width,
            height,
            buffer: blank(width, height),
            alternate_screen: true,
        })
    }

    /// Buffer-only terminal of a fixed size (for print mode)
    pub fn offscreen(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            buffer: blank(width, height),
            alternate_screen: false,
        }
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Adopt new dimensions, discarding the buffer contents
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = blank(width, height);
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            for cell in row {
                *cell = Cell::default();
            }
        }
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// Set a character at position with optional colors
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg, bg, bold };
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bg, bold);
        }
    }

    /// Render the entire buffer to screen
    pub fn present(&self) -> io::Result<()> {
        let mut out = stdout();

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;

            for cell in row {
                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                if let Some(color) = cell.fg {
                    queue!(out, SetForegroundColor(color))?;
                }
                if let Some(color) = cell.bg {
                    queue!(out, SetBackgroundColor(color))?;
                }
                queue!(out, Print(cell.ch))?;
                if cell.bold || cell.fg.is_some() || cell.bg.is_some() {
                    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Wait up to `timeout` for a keypress
    pub fn wait_key(&self, timeout: Duration) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if poll(timeout)? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some((key_event.code, key_event.modifiers)));
            }
        }
        Ok(None)
    }

    /// Buffer contents with ANSI colors, trailing blanks trimmed per line.
    /// Escapes are only emitted where the style changes.
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for row in &self.buffer {
            let used = row
                .iter()
                .rposition(|c| *c != Cell::default())
                .map_or(0, |i| i + 1);

            let mut current: Option<(Option<Color>, Option<Color>, bool)> = None;
            for cell in &row[..used] {
                let style = (cell.fg, cell.bg, cell.bold);
                if current != Some(style) {
                    if current.is_some_and(|(fg, bg, bold)| bold || fg.is_some() || bg.is_some()) {
                        out.push_str("\x1b[0m");
                    }
                    if cell.bold {
                        out.push_str("\x1b[1m");
                    }
                    if let Some(code) = cell.fg.and_then(|c| sgr(c, false)) {
                        out.push_str(&code);
                    }
                    if let Some(code) = cell.bg.and_then(|c| sgr(c, true)) {
                        out.push_str(&code);
                    }
                    current = Some(style);
                }
                out.push(cell.ch);
            }
            if current.is_some_and(|(fg, bg, bold)| bold || fg.is_some() || bg.is_some()) {
                out.push_str("\x1b[0m");
            }
            out.push('\n');
        }
        out
    }

    /// Buffer characters without styling
    #[cfg(test)]
    pub fn text(&self) -> String {
        self.buffer
            .iter()
            .map(|row| {
                let line: String = row.iter().map(|c| c.ch).collect();
                format!("{}\n", line.trim_end())
            })
            .collect()
    }

    /// Print buffer to stdout with ANSI colors (for print mode)
    pub fn print_to_stdout(&self) -> io::Result<()> {
        let mut out = stdout();
        out.write_all(self.to_ansi().as_bytes())?;
        out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

fn blank(width: u16, height: u16) -> Vec<Vec<Cell>> {
    vec![vec![Cell::default(); width as usize]; height as usize]
}

/// SGR escape selecting `color` as foreground or background
fn sgr(color: Color, background: bool) -> Option<String> {
    let base = if background { 40 } else { 30 };
    let code = match color {
        Color::Rgb { r, g, b } => {
            return Some(format!("\x1b[{};2;{};{};{}m", base + 8, r, g, b));
        }
        Color::AnsiValue(v) => return Some(format!("\x1b[{};5;{}m", base + 8, v)),
        // Standard colors (0-7)
        Color::Black => base,
        Color::DarkRed => base + 1,
        Color::DarkGreen => base + 2,
        Color::DarkYellow => base + 3,
        Color::DarkBlue => base + 4,
        Color::DarkMagenta => base + 5,
        Color::DarkCyan => base + 6,
        Color::Grey => base + 7,
        // Bright colors (8-15)
        Color::DarkGrey => base + 60,
        Color::Red => base + 61,
        Color::Green => base + 62,
        Color::Yellow => base + 63,
        Color::Blue => base + 64,
        Color::Magenta => base + 65,
        Color::Cyan => base + 66,
        Color::White => base + 67,
        _ => return None,
    };
    Some(format!("\x1b[{}m", code))
}

/// Helper to create RGB colors
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}
