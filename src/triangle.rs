//! Pascal's triangle construction and lookups

use crate::error::{PascalError, Result};
use std::fmt::Write;

/// Largest row count whose entries and row sums still fit in a `u64`.
pub const MAX_ROWS: usize = 64;

/// A (row, column) coordinate in the triangle. Valid when `col <= row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Jagged array of binomial coefficients. Row `i` holds `i + 1` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triangle {
    rows: Vec<Vec<u64>>,
}

impl Triangle {
    /// Build `n_rows` rows of the triangle starting from `[1]`.
    pub fn build(n_rows: usize) -> Result<Self> {
        if n_rows == 0 {
            return Err(PascalError::InvalidArgument(
                "row count must be positive".to_string(),
            ));
        }
        if n_rows > MAX_ROWS {
            return Err(PascalError::InvalidArgument(format!(
                "row count {} exceeds the maximum of {}",
                n_rows, MAX_ROWS
            )));
        }

        let mut rows: Vec<Vec<u64>> = Vec::with_capacity(n_rows);
        rows.push(vec![1]);
        for _ in 1..n_rows {
            let prev = &rows[rows.len() - 1];
            let mut next = Vec::with_capacity(prev.len() + 1);
            next.push(1);
            next.extend(prev.windows(2).map(|w| w[0] + w[1]));
            next.push(1);
            rows.push(next);
        }

        tracing::trace!(rows = n_rows, "built triangle");
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<u64>] {
        &self.rows
    }

    pub fn row(&self, i: usize) -> Option<&[u64]> {
        self.rows.get(i).map(Vec::as_slice)
    }

    /// Value at `cell`, or `None` when the cell lies outside the triangle.
    pub fn get(&self, cell: Cell) -> Option<u64> {
        self.rows.get(cell.row)?.get(cell.col).copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    pub fn row_sum(&self, i: usize) -> Option<u64> {
        self.row(i).map(|r| r.iter().sum())
    }
}

/// Render `(a + b)^n` expanded with the coefficients of row `n`.
///
/// Coefficients equal to 1 are omitted, as are zero powers; a power of one
/// is written without an exponent.
pub fn binomial_expansion(triangle: &Triangle, n: usize) -> Option<String> {
    let coefficients = triangle.row(n)?;

    let terms: Vec<String> = coefficients
        .iter()
        .enumerate()
        .map(|(r, &c)| {
            let a_power = n - r;
            let b_power = r;
            let mut term = String::new();
            if c != 1 {
                let _ = write!(term, "{}", c);
            }
            push_power(&mut term, 'a', a_power);
            push_power(&mut term, 'b', b_power);
            if term.is_empty() {
                term.push('1');
            }
            term
        })
        .collect();

    Some(format!("(a + b)^{} = {}", n, terms.join(" + ")))
}

fn push_power(term: &mut String, var: char, power: usize) {
    match power {
        0 => {}
        1 => term.push(var),
        p => {
            let _ = write!(term, "{}^{}", var, p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_rows() {
        let tri = Triangle::build(5).unwrap();
        assert_eq!(
            tri.rows(),
            &[
                vec![1],
                vec![1, 1],
                vec![1, 2, 1],
                vec![1, 3, 3, 1],
                vec![1, 4, 6, 4, 1],
            ]
        );
    }

    #[test]
    fn zero_rows_is_invalid() {
        assert!(matches!(
            Triangle::build(0),
            Err(PascalError::InvalidArgument(_))
        ));
    }

    #[test]
    fn too_many_rows_is_invalid() {
        assert!(Triangle::build(MAX_ROWS).is_ok());
        assert!(Triangle::build(MAX_ROWS + 1).is_err());
    }

    #[test]
    fn largest_triangle_row_sums_fit() {
        let tri = Triangle::build(MAX_ROWS).unwrap();
        assert_eq!(tri.row_sum(MAX_ROWS - 1), Some(1u64 << (MAX_ROWS - 1)));
    }

    #[test]
    fn get_outside_bounds() {
        let tri = Triangle::build(4).unwrap();
        assert_eq!(tri.get(Cell::new(3, 1)), Some(3));
        assert_eq!(tri.get(Cell::new(2, 3)), None);
        assert_eq!(tri.get(Cell::new(4, 0)), None);
        assert!(!tri.contains(Cell::new(10, 10)));
    }

    #[test]
    fn rebuild_is_stateless() {
        let small = Triangle::build(3).unwrap();
        let big = Triangle::build(10).unwrap();
        let small_again = Triangle::build(3).unwrap();
        assert_eq!(small, small_again);
        assert_eq!(&big.rows()[..3], small.rows());
    }

    #[test]
    fn expansion_row_four() {
        let tri = Triangle::build(16).unwrap();
        assert_eq!(
            binomial_expansion(&tri, 4).unwrap(),
            "(a + b)^4 = a^4 + 4a^3b + 6a^2b^2 + 4ab^3 + b^4"
        );
    }

    #[test]
    fn expansion_small_rows() {
        let tri = Triangle::build(3).unwrap();
        assert_eq!(binomial_expansion(&tri, 0).unwrap(), "(a + b)^0 = 1");
        assert_eq!(binomial_expansion(&tri, 1).unwrap(), "(a + b)^1 = a + b");
        assert_eq!(binomial_expansion(&tri, 2).unwrap(), "(a + b)^2 = a^2 + 2ab + b^2");
        assert_eq!(binomial_expansion(&tri, 3), None);
    }
}
