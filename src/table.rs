pub mod column_widths;

use tracing::{debug, info};

use crate::error::ViewerError;
use column_widths::ColumnWidths;

/// Outcome of hiding a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideOutcome {
    /// Column is now hidden
    Hidden,
    /// Hiding it would have left nothing visible, so every column was restored
    Reset,
    /// Column index out of range or already hidden
    Ignored,
}

/// Loaded table: row content is immutable, only the hidden flags change
#[derive(Debug, Clone)]
pub struct Table {
    /// rows[0] is the header
    rows: Vec<Vec<String>>,
    widths: ColumnWidths,
    hidden: Vec<bool>,
    /// Number of rows padded or cut to the header's width during load
    normalized_rows: usize,
}

impl Table {
    /// Build a table from parsed rows, the first being the header.
    ///
    /// Rows are normalized to the header's cell count: short rows are padded
    /// with empty cells and extra cells are dropped.
    pub fn new(mut rows: Vec<Vec<String>>) -> Result<Self, ViewerError> {
        if rows.len() < 2 {
            return Err(ViewerError::TooFewRecords);
        }

        let col_count = rows[0].len();
        let mut normalized_rows = 0;
        for row in rows.iter_mut().skip(1) {
            if row.len() != col_count {
                row.resize(col_count, String::new());
                normalized_rows += 1;
            }
        }

        let widths = ColumnWidths::compute(&rows, col_count);
        info!(rows = rows.len(), cols = col_count, "table loaded");

        Ok(Self {
            rows,
            widths,
            hidden: vec![false; col_count],
            normalized_rows,
        })
    }

    /// Number of rows including the header
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.widths.len()
    }

    pub fn get_row(&self, idx: usize) -> Option<&[String]> {
        self.rows.get(idx).map(|r| r.as_slice())
    }

    pub fn col_width(&self, col: usize) -> usize {
        self.widths.get(col)
    }

    pub fn col_widths(&self) -> &[usize] {
        self.widths.as_slice()
    }

    pub fn normalized_rows(&self) -> usize {
        self.normalized_rows
    }

    pub fn is_hidden(&self, col: usize) -> bool {
        self.hidden.get(col).copied().unwrap_or(false)
    }

    pub fn hidden(&self) -> &[bool] {
        &self.hidden
    }

    /// Total width of the columns that are not hidden
    pub fn visible_width(&self) -> usize {
        self.widths.visible_sum(&self.hidden)
    }

    /// Soft-delete a column. If nothing visible would remain, all columns are
    /// shown again instead.
    pub fn hide_column(&mut self, col: usize) -> HideOutcome {
        if col >= self.col_count() || self.hidden[col] {
            return HideOutcome::Ignored;
        }

        self.hidden[col] = true;
        if self.visible_width() == 0 {
            self.show_all_columns();
            info!(col, "last visible column deleted, restoring all columns");
            return HideOutcome::Reset;
        }

        debug!(col, "column hidden");
        HideOutcome::Hidden
    }

    pub fn show_all_columns(&mut self) {
        self.hidden.iter_mut().for_each(|h| *h = false);
    }

    /// First visible column at or after `col`
    pub fn next_visible(&self, col: usize) -> Option<usize> {
        (col..self.col_count()).find(|c| !self.hidden[*c])
    }

    /// Last visible column at or before `col`
    pub fn prev_visible(&self, col: usize) -> Option<usize> {
        let end = col.checked_add(1)?.min(self.col_count());
        (0..end).rev().find(|c| !self.hidden[*c])
    }
}
