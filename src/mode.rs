//! View modes and the user-adjustable parameters behind them

use crate::triangle::{Cell, Triangle};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default number of rows in the base triangle
pub const DEFAULT_ROWS: usize = 16;
/// Smallest base triangle a session offers; the hockey-stick and prime-row
/// sliders need at least two rows
pub const MIN_ROWS: usize = 2;
/// Highest start column the hockey-stick slider offers
pub const HOCKEY_MAX_START: usize = 11;
pub const DEFAULT_HOCKEY_START: usize = 2;
pub const DEFAULT_HOCKEY_LENGTH: usize = 5;
pub const DEFAULT_BINOMIAL_ROW: usize = 4;
pub const DEFAULT_PRIME_ROW: usize = 7;

/// Fibonacci reveal delay bounds, in seconds
pub const MIN_FIBONACCI_DELAY: f32 = 0.2;
pub const MAX_FIBONACCI_DELAY: f32 = 1.0;
pub const DEFAULT_FIBONACCI_DELAY: f32 = 0.8;
const FIBONACCI_DELAY_STEP: f32 = 0.1;

/// Which identity the grid is currently showing. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    RowSum,
    HockeyStick,
    Fibonacci,
    Binomial,
    Fractal,
    PrimeRow,
}

impl ViewMode {
    pub const ALL: [ViewMode; 6] = [
        ViewMode::RowSum,
        ViewMode::HockeyStick,
        ViewMode::Fibonacci,
        ViewMode::Binomial,
        ViewMode::Fractal,
        ViewMode::PrimeRow,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::RowSum => "Row sums (2^n)",
            ViewMode::HockeyStick => "Hockey-stick identity",
            ViewMode::Fibonacci => "Fibonacci diagonals",
            ViewMode::Binomial => "Binomial theorem",
            ViewMode::Fractal => "Fractal structure",
            ViewMode::PrimeRow => "Prime rows",
        }
    }

    /// Mode bound to a number key (1-6)
    pub fn from_digit(digit: u32) -> Option<Self> {
        match digit {
            1..=6 => Some(Self::ALL[digit as usize - 1]),
            _ => None,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rowsum" | "row-sum" | "sum" | "pow2" => Ok(ViewMode::RowSum),
            "hockey" | "hockey-stick" | "hockeystick" => Ok(ViewMode::HockeyStick),
            "fibonacci" | "fibo" | "fib" => Ok(ViewMode::Fibonacci),
            "binomial" | "binom" => Ok(ViewMode::Binomial),
            "fractal" | "sierpinski" => Ok(ViewMode::Fractal),
            "prime" | "prime-row" | "primerow" => Ok(ViewMode::PrimeRow),
            _ => Err(format!(
                "unknown mode '{}' (available: sum, hockey, fibonacci, binomial, fractal, prime)",
                s
            )),
        }
    }
}

/// Which cells the fractal view paints black.
///
/// Six choices but only five distinct tests: `Even` and `MultipleOf2`
/// behave identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FractalPredicate {
    #[default]
    Odd,
    Even,
    MultipleOf2,
    MultipleOf3,
    MultipleOf4,
    MultipleOf5,
}

impl FractalPredicate {
    pub const ALL: [FractalPredicate; 6] = [
        FractalPredicate::Odd,
        FractalPredicate::Even,
        FractalPredicate::MultipleOf2,
        FractalPredicate::MultipleOf3,
        FractalPredicate::MultipleOf4,
        FractalPredicate::MultipleOf5,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FractalPredicate::Odd => "odd (Sierpinski)",
            FractalPredicate::Even => "even",
            FractalPredicate::MultipleOf2 => "multiple of 2",
            FractalPredicate::MultipleOf3 => "multiple of 3",
            FractalPredicate::MultipleOf4 => "multiple of 4",
            FractalPredicate::MultipleOf5 => "multiple of 5",
        }
    }

    pub fn holds(self, value: u64) -> bool {
        match self {
            FractalPredicate::Odd => value % 2 == 1,
            FractalPredicate::Even | FractalPredicate::MultipleOf2 => value % 2 == 0,
            FractalPredicate::MultipleOf3 => value % 3 == 0,
            FractalPredicate::MultipleOf4 => value % 4 == 0,
            FractalPredicate::MultipleOf5 => value % 5 == 0,
        }
    }

    /// Step through the choices, wrapping at either end
    pub fn cycle(self, delta: i32) -> Self {
        let len = Self::ALL.len() as i32;
        let idx = Self::ALL.iter().position(|&p| p == self).unwrap_or(0) as i32;
        Self::ALL[(idx + delta).rem_euclid(len) as usize]
    }
}

impl FromStr for FractalPredicate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "odd" | "sierpinski" => Ok(FractalPredicate::Odd),
            "even" => Ok(FractalPredicate::Even),
            "2" | "mul2" => Ok(FractalPredicate::MultipleOf2),
            "3" | "mul3" => Ok(FractalPredicate::MultipleOf3),
            "4" | "mul4" => Ok(FractalPredicate::MultipleOf4),
            "5" | "mul5" => Ok(FractalPredicate::MultipleOf5),
            _ => Err(format!(
                "unknown fractal predicate '{}' (available: odd, even, 2, 3, 4, 5)",
                s
            )),
        }
    }
}

/// A run of `length` cells down column `start_col`, and the cell past its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HockeyStickSelection {
    pub start_col: usize,
    pub length: usize,
}

/// Outcome of summing a hockey-stick run against its end cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HockeyStickCheck {
    pub values: Vec<u64>,
    pub total: u64,
    pub end_value: u64,
}

impl HockeyStickCheck {
    pub fn holds(&self) -> bool {
        self.total == self.end_value
    }

    /// `v1 + v2 + ... = total = end`
    pub fn expression(&self) -> String {
        let terms: Vec<String> = self.values.iter().map(u64::to_string).collect();
        format!("{} = {} = {}", terms.join(" + "), self.total, self.end_value)
    }
}

impl HockeyStickSelection {
    /// Largest start column for a triangle of `rows` rows
    pub fn max_start(rows: usize) -> usize {
        rows.saturating_sub(2).min(HOCKEY_MAX_START)
    }

    /// Largest run length for `start_col`; never below 2
    pub fn max_length(rows: usize, start_col: usize) -> usize {
        rows.saturating_sub(1).saturating_sub(start_col).max(2)
    }

    /// Selection with both values clamped to the slider ranges
    pub fn clamped(rows: usize, start_col: usize, length: usize) -> Self {
        let start_col = start_col.min(Self::max_start(rows));
        let length = length.clamp(2, Self::max_length(rows, start_col));
        Self { start_col, length }
    }

    pub fn initial(rows: usize) -> Self {
        let start_col = DEFAULT_HOCKEY_START.min(Self::max_start(rows));
        let length = DEFAULT_HOCKEY_LENGTH.min(Self::max_length(rows, start_col));
        Self::clamped(rows, start_col, length)
    }

    pub fn diagonal_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.length).map(move |t| Cell::new(self.start_col + t, self.start_col))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.col == self.start_col
            && cell.row >= self.start_col
            && cell.row < self.start_col + self.length
    }

    pub fn end_cell(&self) -> Cell {
        Cell::new(self.start_col + self.length, self.start_col + 1)
    }

    /// Sum the in-bounds run against the end cell. `None` when the end cell
    /// falls outside `triangle` or no run cell exists.
    pub fn check(&self, triangle: &Triangle) -> Option<HockeyStickCheck> {
        let mut values: Vec<u64> = self
            .diagonal_cells()
            .filter_map(|cell| triangle.get(cell))
            .collect();
        values.sort_unstable();

        let end_value = triangle.get(self.end_cell())?;
        if values.is_empty() {
            return None;
        }
        let total: u64 = values.iter().sum();
        Some(HockeyStickCheck {
            values,
            total,
            end_value,
        })
    }
}

/// Slider-derived parameters for every mode. Owned by one session.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeParams {
    pub hockey: HockeyStickSelection,
    pub binomial_row: usize,
    pub fractal_predicate: FractalPredicate,
    pub prime_row: usize,
    /// Seconds between Fibonacci reveal steps
    pub fibonacci_delay: f32,
}

impl ModeParams {
    pub fn new(rows: usize) -> Self {
        Self {
            hockey: HockeyStickSelection::initial(rows),
            binomial_row: DEFAULT_BINOMIAL_ROW.min(rows.saturating_sub(1)),
            fractal_predicate: FractalPredicate::default(),
            prime_row: clamp_prime_row(rows, DEFAULT_PRIME_ROW),
            fibonacci_delay: DEFAULT_FIBONACCI_DELAY,
        }
    }

    /// Restore the defaults of the parameters `mode` owns
    pub fn reset_for(&mut self, mode: ViewMode, rows: usize) {
        let defaults = Self::new(rows);
        match mode {
            ViewMode::RowSum => {}
            ViewMode::HockeyStick => self.hockey = defaults.hockey,
            ViewMode::Fibonacci => self.fibonacci_delay = defaults.fibonacci_delay,
            ViewMode::Binomial => self.binomial_row = defaults.binomial_row,
            ViewMode::Fractal => self.fractal_predicate = defaults.fractal_predicate,
            ViewMode::PrimeRow => self.prime_row = defaults.prime_row,
        }
    }

    /// Pull every parameter back into range after the row count changes
    pub fn fit_to(&mut self, rows: usize) {
        self.hockey = HockeyStickSelection::clamped(rows, self.hockey.start_col, self.hockey.length);
        self.binomial_row = self.binomial_row.min(rows.saturating_sub(1));
        self.prime_row = clamp_prime_row(rows, self.prime_row);
        self.fibonacci_delay = clamp_delay(self.fibonacci_delay);
    }

    /// Move the mode's main slider: start column, row index, predicate or speed
    pub fn adjust_primary(&mut self, mode: ViewMode, delta: i32, rows: usize) {
        match mode {
            ViewMode::RowSum => {}
            ViewMode::HockeyStick => {
                let start = offset(self.hockey.start_col, delta);
                self.hockey = HockeyStickSelection::clamped(rows, start, self.hockey.length);
            }
            ViewMode::Fibonacci => {
                self.fibonacci_delay =
                    clamp_delay(self.fibonacci_delay + delta as f32 * FIBONACCI_DELAY_STEP);
            }
            ViewMode::Binomial => {
                self.binomial_row = offset(self.binomial_row, delta).min(rows.saturating_sub(1));
            }
            ViewMode::Fractal => self.fractal_predicate = self.fractal_predicate.cycle(delta),
            ViewMode::PrimeRow => self.prime_row = clamp_prime_row(rows, offset(self.prime_row, delta)),
        }
    }

    /// Move the mode's second slider (only the hockey-stick length has one)
    pub fn adjust_secondary(&mut self, mode: ViewMode, delta: i32, rows: usize) {
        if mode == ViewMode::HockeyStick {
            let length = offset(self.hockey.length, delta);
            self.hockey = HockeyStickSelection::clamped(rows, self.hockey.start_col, length);
        }
    }

    pub fn fibonacci_delay(&self) -> Duration {
        Duration::from_millis((clamp_delay(self.fibonacci_delay) * 1000.0).round() as u64)
    }
}

fn offset(value: usize, delta: i32) -> usize {
    if delta < 0 {
        value.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        value.saturating_add(delta as usize)
    }
}

fn clamp_delay(secs: f32) -> f32 {
    if secs.is_nan() {
        return DEFAULT_FIBONACCI_DELAY;
    }
    // Round to a tenth so repeated steps don't drift
    ((secs * 10.0).round() / 10.0).clamp(MIN_FIBONACCI_DELAY, MAX_FIBONACCI_DELAY)
}

/// Prime-row slider range is `2..=rows-1`; tiny triangles pin it at 2
fn clamp_prime_row(rows: usize, row: usize) -> usize {
    row.clamp(2, rows.saturating_sub(1).max(2))
}
