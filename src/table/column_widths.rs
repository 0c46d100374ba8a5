use rayon::prelude::*;
use std::cmp;

use crate::string::display_width;

/// Threshold for using parallel processing (rows * cols)
const PARALLEL_THRESHOLD: usize = 10_000;

/// Display width of every column, computed once at load time.
/// Hiding a column never changes its width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnWidths {
    widths: Vec<usize>,
}

impl ColumnWidths {
    /// Max display width of each of the first `col_count` cells over all rows.
    /// Uses parallel processing for large tables
    pub fn compute(rows: &[Vec<String>], col_count: usize) -> Self {
        let fold_row = |mut acc: Vec<usize>, row: &Vec<String>| {
            for (acc_w, cell) in acc.iter_mut().zip(row.iter()) {
                *acc_w = cmp::max(*acc_w, display_width(cell));
            }
            acc
        };

        let widths = if rows.len() * col_count >= PARALLEL_THRESHOLD {
            rows.par_iter()
                .fold(|| vec![0; col_count], fold_row)
                .reduce(
                    || vec![0; col_count],
                    |a, b| a.iter().zip(b.iter()).map(|(x, y)| cmp::max(*x, *y)).collect(),
                )
        } else {
            rows.iter().fold(vec![0; col_count], fold_row)
        };

        Self { widths }
    }

    pub fn get(&self, col: usize) -> usize {
        self.widths.get(col).copied().unwrap_or(0)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.widths
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Sum of widths of the columns not flagged in `hidden`
    pub fn visible_sum(&self, hidden: &[bool]) -> usize {
        self.widths
            .iter()
            .enumerate()
            .filter(|(col, _)| !hidden.get(*col).copied().unwrap_or(false))
            .map(|(_, w)| w)
            .sum()
    }
}
