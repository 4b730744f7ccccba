//! Build a complete frame description from session state

use crate::animation::{AnimationState, FRACTAL_MAX_ROWS};
use crate::colorize::{color_for, row_label, CellStyle};
use crate::fibonacci::FibonacciPlan;
use crate::mode::{ModeParams, ViewMode};
use crate::prime::is_prime;
use crate::triangle::{binomial_expansion, Cell, Triangle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCell {
    pub cell: Cell,
    pub value: u64,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRow {
    pub cells: Vec<FrameCell>,
    pub label: Option<String>,
}

/// Everything a presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub rows: Vec<FrameRow>,
    /// Explanatory lines under the grid
    pub captions: Vec<String>,
    /// Fibonacci bar chart as `(diagonal number, sum)`
    pub chart: Vec<(usize, u64)>,
}

impl Frame {
    /// Widest value in the grid, in characters
    pub fn value_width(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .map(|c| c.value.to_string().len())
            .max()
            .unwrap_or(1)
    }
}

/// Inputs to [`render_frame`]
pub struct RenderInput<'a> {
    /// Triangle to draw; the fractal view passes its own grown triangle
    pub triangle: &'a Triangle,
    /// Base triangle the identities are checked against
    pub base: &'a Triangle,
    pub plan: &'a FibonacciPlan,
    pub mode: ViewMode,
    pub params: &'a ModeParams,
    pub fibonacci: &'a AnimationState,
    pub fractal: &'a AnimationState,
}

pub fn render_frame(input: &RenderInput<'_>) -> Frame {
    let rows = input
        .triangle
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| FrameRow {
            cells: row
                .iter()
                .enumerate()
                .map(|(j, &value)| {
                    let cell = Cell::new(i, j);
                    FrameCell {
                        cell,
                        value,
                        style: color_for(
                            cell,
                            value,
                            input.mode,
                            input.params,
                            input.plan,
                            input.fibonacci,
                        ),
                    }
                })
                .collect(),
            label: row_label(input.mode, input.triangle, i),
        })
        .collect();

    let chart = if input.mode == ViewMode::Fibonacci {
        input.plan.chart(input.fibonacci.counter())
    } else {
        Vec::new()
    };

    Frame {
        rows,
        captions: captions(input),
        chart,
    }
}

fn captions(input: &RenderInput<'_>) -> Vec<String> {
    let params = input.params;
    match input.mode {
        ViewMode::RowSum => vec!["Each row sums to a power of two.".to_string()],
        ViewMode::HockeyStick => {
            let sel = params.hockey;
            let mut lines = vec![format!(
                "column r = {}, length = {}, end cell = ({}, {})",
                sel.start_col,
                sel.length,
                sel.end_cell().row,
                sel.end_cell().col
            )];
            match sel.check(input.base) {
                Some(check) if check.holds() => {
                    lines.push(check.expression());
                    lines.push("The diagonal sum matches the end cell.".to_string());
                }
                Some(check) => {
                    lines.push(check.expression());
                    lines.push("Selection is out of range; the sums differ.".to_string());
                }
                None => {
                    tracing::debug!(?sel, "hockey-stick end cell outside triangle");
                    lines.push("End cell lies outside the triangle.".to_string());
                }
            }
            lines
        }
        ViewMode::Fibonacci => {
            let step = input.fibonacci.counter();
            let mut lines = vec![format!(
                "diagonal {}/{}  delay {:.1}s",
                step,
                input.plan.len(),
                params.fibonacci_delay
            )];
            if let Some(sum) = step.checked_sub(1).and_then(|i| input.plan.sums().get(i)) {
                lines.push(format!("diagonal {} sums to {}", step, sum));
            }
            lines
        }
        ViewMode::Binomial => binomial_expansion(input.base, params.binomial_row)
            .into_iter()
            .collect(),
        ViewMode::Fractal => vec![format!(
            "rows {}/{}  coloring: {}",
            input.fractal.counter(),
            FRACTAL_MAX_ROWS,
            params.fractal_predicate.label()
        )],
        ViewMode::PrimeRow => {
            let p = params.prime_row;
            if is_prime(p as i64) {
                vec![format!(
                    "p = {} is prime: every interior entry of row {} is a multiple of {}",
                    p, p, p
                )]
            } else {
                vec![format!("p = {} is not prime", p)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorize::Fill;

    fn frame_for(mode: ViewMode, rows: usize) -> Frame {
        let tri = Triangle::build(rows).unwrap();
        let plan = FibonacciPlan::plan(&tri);
        let params = ModeParams::new(rows);
        let fib = AnimationState::fibonacci(plan.len())
            .start(std::time::Duration::ZERO)
            .state;
        let fractal = AnimationState::fractal();
        render_frame(&RenderInput {
            triangle: &tri,
            base: &tri,
            plan: &plan,
            mode,
            params: &params,
            fibonacci: &fib,
            fractal: &fractal,
        })
    }

    #[test]
    fn grid_shape_matches_triangle() {
        let frame = frame_for(ViewMode::RowSum, 6);
        assert_eq!(frame.rows.len(), 6);
        for (i, row) in frame.rows.iter().enumerate() {
            assert_eq!(row.cells.len(), i + 1);
            assert!(row.label.is_some());
        }
        assert_eq!(frame.value_width(), 2);
    }

    #[test]
    fn hockey_caption_reports_match() {
        let frame = frame_for(ViewMode::HockeyStick, 16);
        // r = 2, L = 5: 1 + 3 + 6 + 10 + 15 = 35 = C(7, 3)
        assert_eq!(frame.captions[1], "1 + 3 + 6 + 10 + 15 = 35 = 35");
        assert!(frame.captions[2].contains("matches"));
    }

    #[test]
    fn hockey_end_cell_off_grid_still_renders() {
        // three rows pin the sliders at r = 1, L = 2, ending at (3, 2)
        let mut params = ModeParams::new(3);
        params.adjust_primary(ViewMode::HockeyStick, 5, 3);
        params.adjust_secondary(ViewMode::HockeyStick, 5, 3);
        assert_eq!(params.hockey.start_col, 1);
        assert_eq!(params.hockey.length, 2);

        let tri = Triangle::build(3).unwrap();
        let plan = FibonacciPlan::plan(&tri);
        let fib = AnimationState::fibonacci(plan.len());
        let fractal = AnimationState::fractal();
        let frame = render_frame(&RenderInput {
            triangle: &tri,
            base: &tri,
            plan: &plan,
            mode: ViewMode::HockeyStick,
            params: &params,
            fibonacci: &fib,
            fractal: &fractal,
        });

        assert_eq!(frame.rows.len(), 3);
        assert_eq!(frame.captions[0], "column r = 1, length = 2, end cell = (3, 2)");
        assert_eq!(frame.captions[1], "End cell lies outside the triangle.");
        assert_eq!(frame.rows[1].cells[1].style.fill, Fill::Highlight);
        assert_eq!(frame.rows[2].cells[1].style.fill, Fill::Highlight);
        assert!(frame
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .all(|c| c.style.fill != Fill::Result));
    }

    #[test]
    fn fibonacci_chart_follows_step() {
        let frame = frame_for(ViewMode::Fibonacci, 16);
        assert_eq!(frame.chart, vec![(1, 1)]);
        assert!(frame_for(ViewMode::RowSum, 16).chart.is_empty());
    }

    #[test]
    fn binomial_caption() {
        let frame = frame_for(ViewMode::Binomial, 16);
        assert_eq!(
            frame.captions,
            vec!["(a + b)^4 = a^4 + 4a^3b + 6a^2b^2 + 4ab^3 + b^4".to_string()]
        );
        assert_eq!(frame.rows[4].cells[2].style.fill, Fill::Highlight);
    }

    #[test]
    fn prime_caption() {
        let frame = frame_for(ViewMode::PrimeRow, 16);
        assert!(frame.captions[0].starts_with("p = 7 is prime"));
    }
}
