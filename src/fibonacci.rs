//! Shallow-diagonal paths whose sums trace the Fibonacci sequence

use crate::triangle::{Cell, Triangle};

/// Diagonals of a triangle with their sums. `paths[i]` and `sums[i]`
/// both describe diagonal `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FibonacciPlan {
    paths: Vec<Vec<Cell>>,
    sums: Vec<u64>,
}

impl FibonacciPlan {
    /// Walk diagonal `n` (1-based) through cells `(n-1-k, k)` for
    /// `k in 0..n`, keeping only cells that exist in `triangle`.
    pub fn plan(triangle: &Triangle) -> Self {
        let count = triangle.len();
        let mut paths = Vec::with_capacity(count);
        let mut sums = Vec::with_capacity(count);

        for n in 1..=count {
            let path: Vec<Cell> = (0..n)
                .map(|k| Cell::new(n - 1 - k, k))
                .filter(|&cell| triangle.contains(cell))
                .collect();
            let sum = path.iter().filter_map(|&cell| triangle.get(cell)).sum();
            paths.push(path);
            sums.push(sum);
        }

        Self { paths, sums }
    }

    pub fn paths(&self) -> &[Vec<Cell>] {
        &self.paths
    }

    pub fn sums(&self) -> &[u64] {
        &self.sums
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Index of the diagonal containing `cell`, if it is on one.
    pub fn diagonal_of(&self, cell: Cell) -> Option<usize> {
        let idx = cell.row + cell.col;
        self.paths
            .get(idx)
            .filter(|path| path.contains(&cell))
            .map(|_| idx)
    }

    /// Bar chart series for the first `step` diagonals as
    /// `(diagonal number, sum)` pairs.
    pub fn chart(&self, step: usize) -> Vec<(usize, u64)> {
        self.sums
            .iter()
            .take(step)
            .enumerate()
            .map(|(i, &sum)| (i + 1, sum))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_rows_give_fibonacci() {
        let plan = FibonacciPlan::plan(&Triangle::build(16).unwrap());
        assert_eq!(
            plan.sums(),
            &[1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377, 610, 987]
        );
    }

    #[test]
    fn paths_skip_missing_cells() {
        let plan = FibonacciPlan::plan(&Triangle::build(5).unwrap());
        assert_eq!(plan.paths()[0], vec![Cell::new(0, 0)]);
        assert_eq!(plan.paths()[1], vec![Cell::new(1, 0)]);
        assert_eq!(plan.paths()[2], vec![Cell::new(2, 0), Cell::new(1, 1)]);
        assert_eq!(
            plan.paths()[4],
            vec![Cell::new(4, 0), Cell::new(3, 1), Cell::new(2, 2)]
        );
    }

    #[test]
    fn aligned_lengths() {
        let plan = FibonacciPlan::plan(&Triangle::build(9).unwrap());
        assert_eq!(plan.len(), 9);
        assert_eq!(plan.sums().len(), plan.paths().len());
    }

    #[test]
    fn diagonal_lookup() {
        let plan = FibonacciPlan::plan(&Triangle::build(8).unwrap());
        assert_eq!(plan.diagonal_of(Cell::new(3, 1)), Some(4));
        assert_eq!(plan.diagonal_of(Cell::new(0, 0)), Some(0));
        // (1, 1) sits on diagonal 2 as k=1 -> row 1
        assert_eq!(plan.diagonal_of(Cell::new(1, 1)), Some(2));
        assert_eq!(plan.diagonal_of(Cell::new(7, 7)), None);
    }

    #[test]
    fn chart_prefix() {
        let plan = FibonacciPlan::plan(&Triangle::build(10).unwrap());
        assert!(plan.chart(0).is_empty());
        assert_eq!(plan.chart(4), vec![(1, 1), (2, 1), (3, 2), (4, 3)]);
        assert_eq!(plan.chart(99).len(), 10);
    }
}
