//! Per-cell styling for each view mode

use crate::animation::AnimationState;
use crate::fibonacci::FibonacciPlan;
use crate::mode::{ModeParams, ViewMode};
use crate::prime::is_prime;
use crate::triangle::{Cell, Triangle};

/// Number of colors the Fibonacci diagonals rotate through
pub const PALETTE_SIZE: usize = 5;

/// Semantic fill of a cell. Mapped to real colors by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fill {
    Default,
    /// Hockey-stick run, binomial row, prime-row boundary 1s
    Highlight,
    /// Hockey-stick end cell
    Result,
    /// Fibonacci diagonal, index into the palette
    Palette(usize),
    /// Interior prime-row entry divisible by the row index
    Multiple,
    /// Selected row index is not prime
    NotApplicable,
    Black,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Border {
    Thin,
    /// Diagonal currently being revealed
    Accent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellStyle {
    pub fill: Fill,
    pub border: Border,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fill: Fill::Default,
            border: Border::Thin,
        }
    }
}

impl CellStyle {
    const fn filled(fill: Fill) -> Self {
        Self {
            fill,
            border: Border::Thin,
        }
    }
}

/// Style for one cell under `mode`.
///
/// `fibonacci` is only read in Fibonacci mode; pass the Fibonacci state
/// there. The result depends on nothing but the arguments.
pub fn color_for(
    cell: Cell,
    value: u64,
    mode: ViewMode,
    params: &ModeParams,
    plan: &FibonacciPlan,
    fibonacci: &AnimationState,
) -> CellStyle {
    match mode {
        ViewMode::RowSum => CellStyle::default(),
        ViewMode::HockeyStick => {
            let hockey = &params.hockey;
            if cell == hockey.end_cell() {
                CellStyle::filled(Fill::Result)
            } else if hockey.contains(cell) {
                CellStyle::filled(Fill::Highlight)
            } else {
                CellStyle::default()
            }
        }
        ViewMode::Fibonacci => fibonacci_style(cell, plan, fibonacci.counter()),
        ViewMode::Binomial => {
            if cell.row == params.binomial_row {
                CellStyle::filled(Fill::Highlight)
            } else {
                CellStyle::default()
            }
        }
        ViewMode::Fractal => {
            if params.fractal_predicate.holds(value) {
                CellStyle::filled(Fill::Black)
            } else {
                CellStyle::filled(Fill::White)
            }
        }
        ViewMode::PrimeRow => prime_row_style(cell, value, params.prime_row),
    }
}

fn fibonacci_style(cell: Cell, plan: &FibonacciPlan, step: usize) -> CellStyle {
    let upto = step.min(plan.len());
    let current = step.checked_sub(1).filter(|&cur| cur < plan.len());

    let Some(idx) = plan.diagonal_of(cell) else {
        return CellStyle::default();
    };

    // The diagonal being revealed repaints over its settled color
    if current == Some(idx) {
        return CellStyle {
            fill: Fill::Palette(idx % PALETTE_SIZE),
            border: Border::Accent,
        };
    }
    if idx < upto {
        return CellStyle::filled(Fill::Palette(idx % PALETTE_SIZE));
    }
    CellStyle::default()
}

fn prime_row_style(cell: Cell, value: u64, prime_row: usize) -> CellStyle {
    if cell.row != prime_row {
        return CellStyle::default();
    }
    if !is_prime(prime_row as i64) {
        return CellStyle::filled(Fill::NotApplicable);
    }
    if cell.col == 0 || cell.col == cell.row {
        CellStyle::filled(Fill::Highlight)
    } else if value % prime_row as u64 == 0 {
        CellStyle::filled(Fill::Multiple)
    } else {
        CellStyle::default()
    }
}

/// Side label for row `i`, shown only in the row-sum view
pub fn row_label(mode: ViewMode, triangle: &Triangle, i: usize) -> Option<String> {
    if mode != ViewMode::RowSum {
        return None;
    }
    let sum = triangle.row_sum(i)?;
    Some(format!("→ sum = {} = 2^{}", sum, i))
}
