use crate::table::{HideOutcome, Table};
use crate::viewport::Viewport;

/// Direction of a one-step move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Back,
    Forward,
}

/// Highlighted column. The boundary variants mean the selection has left the
/// data area on that side; `BeforeFirst` is also the initial "nothing selected".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnCursor {
    BeforeFirst,
    At(usize),
    AfterLast,
}

impl ColumnCursor {
    pub fn index(&self) -> Option<usize> {
        match self {
            ColumnCursor::At(col) => Some(*col),
            _ => None,
        }
    }
}

/// Result of moving the row selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMove {
    /// Moved between two screen rows already on screen
    Moved { from: usize, to: usize },
    /// The viewport scrolled instead so the selection stays on screen
    Scrolled,
    Rejected,
}

/// Row and column selection.
///
/// `row` is a screen row: 0 is the header line, 1 the first data row on
/// screen. Selecting 0 means the selection went above the first data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub row: usize,
    pub col: ColumnCursor,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            row: 1,
            col: ColumnCursor::BeforeFirst,
        }
    }
}

/// Last screen row that shows table content
pub fn last_visible_row(table: &Table, scroll_y: usize, screen_height: usize) -> usize {
    table
        .row_count()
        .saturating_sub(scroll_y)
        .min(screen_height)
        .saturating_sub(1)
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the selected row one step. At the top or bottom edge of the window
    /// the viewport scrolls by one row instead, as long as it can.
    pub fn move_row(
        &mut self,
        step: Step,
        viewport: &mut Viewport,
        table: &Table,
        screen_height: usize,
    ) -> RowMove {
        let from = self.row;
        match step {
            Step::Back => {
                if from > 1 || (from == 1 && viewport.scroll_y == 0) {
                    self.row -= 1;
                    RowMove::Moved { from, to: self.row }
                } else if from == 1 && viewport.scroll_up() {
                    RowMove::Scrolled
                } else {
                    RowMove::Rejected
                }
            }
            Step::Forward => {
                let last = last_visible_row(table, viewport.scroll_y, screen_height);
                if from < last {
                    self.row += 1;
                    RowMove::Moved { from, to: self.row }
                } else if viewport.scroll_down(table, screen_height) {
                    RowMove::Scrolled
                } else {
                    RowMove::Rejected
                }
            }
        }
    }

    /// Keep the selected row inside the window after the screen changed size
    pub fn clamp_row(&mut self, table: &Table, scroll_y: usize, screen_height: usize) {
        self.row = self.row.min(last_visible_row(table, scroll_y, screen_height));
    }

    /// Move the column cursor one step, silently skipping hidden columns.
    /// Returns false when the cursor did not change.
    pub fn move_col(&mut self, step: Step, table: &Table) -> bool {
        let at_or = |col: Option<usize>, boundary: ColumnCursor| col.map_or(boundary, ColumnCursor::At);

        let next = match (self.col, step) {
            (ColumnCursor::BeforeFirst, Step::Back) => ColumnCursor::BeforeFirst,
            (ColumnCursor::BeforeFirst, Step::Forward) => {
                at_or(table.next_visible(0), ColumnCursor::AfterLast)
            }
            (ColumnCursor::At(col), Step::Back) => at_or(
                col.checked_sub(1).and_then(|prev| table.prev_visible(prev)),
                ColumnCursor::BeforeFirst,
            ),
            (ColumnCursor::At(col), Step::Forward) => {
                at_or(table.next_visible(col + 1), ColumnCursor::AfterLast)
            }
            (ColumnCursor::AfterLast, Step::Back) => at_or(
                table.col_count().checked_sub(1).and_then(|last| table.prev_visible(last)),
                ColumnCursor::BeforeFirst,
            ),
            (ColumnCursor::AfterLast, Step::Forward) => ColumnCursor::AfterLast,
        };

        let changed = next != self.col;
        self.col = next;
        changed
    }

    /// Hide the selected column and move the cursor to a neighbouring visible
    /// column (right first, then left). Returns false if nothing was hidden.
    pub fn delete_selected_column(&mut self, table: &mut Table) -> bool {
        let Some(col) = self.col.index() else {
            return false;
        };

        match table.hide_column(col) {
            HideOutcome::Ignored => false,
            HideOutcome::Reset => true,
            HideOutcome::Hidden => {
                self.col = table
                    .next_visible(col + 1)
                    .or_else(|| table.prev_visible(col))
                    .map_or(ColumnCursor::AfterLast, ColumnCursor::At);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(data: Vec<Vec<&str>>) -> Table {
        Table::new(
            data.into_iter()
                .map(|row| row.into_iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    fn tall_table(data_rows: usize) -> Table {
        let mut data = vec![vec!["a".to_string(), "b".to_string()]];
        for i in 0..data_rows {
            data.push(vec![i.to_string(), i.to_string()]);
        }
        Table::new(data).unwrap()
    }

    fn wide_table() -> Table {
        make_table(vec![vec!["a", "b", "c", "d"], vec!["1", "2", "3", "4"]])
    }

    #[test]
    fn test_initial_state() {
        let sel = Selection::new();
        assert_eq!(sel.row, 1);
        assert_eq!(sel.col, ColumnCursor::BeforeFirst);
        assert_eq!(sel.col.index(), None);
    }

    #[test]
    fn test_move_down_within_window_keeps_scroll() {
        let table = tall_table(10);
        let mut vp = Viewport::new();
        let mut sel = Selection::new();

        for expected in 2..5 {
            let result = sel.move_row(Step::Forward, &mut vp, &table, 5);
            assert_eq!(result, RowMove::Moved { from: expected - 1, to: expected });
            assert_eq!(vp.scroll_y, 0);
        }
    }

    #[test]
    fn test_move_down_at_bottom_scrolls_by_one() {
        let table = tall_table(10);
        let mut vp = Viewport::new();
        let mut sel = Selection { row: 4, col: ColumnCursor::BeforeFirst };

        assert_eq!(sel.move_row(Step::Forward, &mut vp, &table, 5), RowMove::Scrolled);
        assert_eq!(vp.scroll_y, 1);
        assert_eq!(sel.row, 4);
    }

    #[test]
    fn test_move_down_never_scrolls_past_end() {
        // 11 rows including the header on a 5 row screen
        let table = tall_table(10);
        let mut vp = Viewport::new();
        let mut sel = Selection::new();

        let mut scrolls = 0;
        for _ in 0..50 {
            if sel.move_row(Step::Forward, &mut vp, &table, 5) == RowMove::Scrolled {
                scrolls += 1;
            }
        }
        assert_eq!(vp.scroll_y, 11 - 5);
        assert_eq!(scrolls, 6);
        assert_eq!(sel.row, 4);
        assert_eq!(sel.move_row(Step::Forward, &mut vp, &table, 5), RowMove::Rejected);
    }

    #[test]
    fn test_move_down_short_table_stops_at_last_row() {
        let table = tall_table(2);
        let mut vp = Viewport::new();
        let mut sel = Selection::new();

        assert_eq!(
            sel.move_row(Step::Forward, &mut vp, &table, 10),
            RowMove::Moved { from: 1, to: 2 }
        );
        assert_eq!(sel.move_row(Step::Forward, &mut vp, &table, 10), RowMove::Rejected);
        assert_eq!(sel.row, 2);
    }

    #[test]
    fn test_move_up_to_header_then_rejected() {
        let table = tall_table(3);
        let mut vp = Viewport::new();
        let mut sel = Selection::new();

        assert_eq!(
            sel.move_row(Step::Back, &mut vp, &table, 4),
            RowMove::Moved { from: 1, to: 0 }
        );
        assert_eq!(sel.move_row(Step::Back, &mut vp, &table, 4), RowMove::Rejected);
        assert_eq!(sel.row, 0);
    }

    #[test]
    fn test_move_up_at_top_scrolls_when_scrolled() {
        let table = tall_table(10);
        let mut vp = Viewport::new();
        vp.scroll_y = 2;
        let mut sel = Selection::new();

        assert_eq!(sel.move_row(Step::Back, &mut vp, &table, 5), RowMove::Scrolled);
        assert_eq!(sel.move_row(Step::Back, &mut vp, &table, 5), RowMove::Scrolled);
        assert_eq!(vp.scroll_y, 0);
        assert_eq!(sel.row, 1);
        assert_eq!(
            sel.move_row(Step::Back, &mut vp, &table, 5),
            RowMove::Moved { from: 1, to: 0 }
        );
    }

    #[test]
    fn test_clamp_row_after_shrink() {
        let table = tall_table(10);
        let mut sel = Selection { row: 8, col: ColumnCursor::BeforeFirst };
        sel.clamp_row(&table, 0, 4);
        assert_eq!(sel.row, 3);
    }

    #[test]
    fn test_move_col_walks_to_boundaries() {
        let table = wide_table();
        let mut sel = Selection::new();

        assert!(!sel.move_col(Step::Back, &table));
        for col in 0..4 {
            assert!(sel.move_col(Step::Forward, &table));
            assert_eq!(sel.col, ColumnCursor::At(col));
        }
        assert!(sel.move_col(Step::Forward, &table));
        assert_eq!(sel.col, ColumnCursor::AfterLast);
        assert!(!sel.move_col(Step::Forward, &table));

        assert!(sel.move_col(Step::Back, &table));
        assert_eq!(sel.col, ColumnCursor::At(3));
    }

    #[test]
    fn test_move_col_skips_hidden() {
        let mut table = wide_table();
        table.hide_column(1);
        table.hide_column(2);
        let mut sel = Selection { row: 1, col: ColumnCursor::At(0) };

        assert!(sel.move_col(Step::Forward, &table));
        assert_eq!(sel.col, ColumnCursor::At(3));
        assert!(sel.move_col(Step::Back, &table));
        assert_eq!(sel.col, ColumnCursor::At(0));
        assert!(sel.move_col(Step::Back, &table));
        assert_eq!(sel.col, ColumnCursor::BeforeFirst);
    }

    #[test]
    fn test_move_col_runs_off_end_when_rest_hidden() {
        let mut table = wide_table();
        table.hide_column(3);
        let mut sel = Selection { row: 1, col: ColumnCursor::At(2) };
        assert!(sel.move_col(Step::Forward, &table));
        assert_eq!(sel.col, ColumnCursor::AfterLast);
    }

    #[test]
    fn test_delete_without_selection_does_nothing() {
        let mut table = wide_table();
        let mut sel = Selection::new();
        assert!(!sel.delete_selected_column(&mut table));
        assert_eq!(table.hidden(), &[false; 4]);
    }

    #[test]
    fn test_delete_moves_cursor_right_then_left() {
        let mut table = wide_table();
        let mut sel = Selection { row: 1, col: ColumnCursor::At(2) };

        assert!(sel.delete_selected_column(&mut table));
        assert!(table.is_hidden(2));
        assert_eq!(sel.col, ColumnCursor::At(3));

        assert!(sel.delete_selected_column(&mut table));
        assert_eq!(sel.col, ColumnCursor::At(1));
    }

    #[test]
    fn test_delete_everything_resets() {
        let mut table = wide_table();
        let mut sel = Selection { row: 1, col: ColumnCursor::At(0) };

        for _ in 0..3 {
            assert!(sel.delete_selected_column(&mut table));
        }
        assert_eq!(sel.col, ColumnCursor::At(3));
        assert_eq!(table.hidden(), &[true, true, true, false]);

        assert!(sel.delete_selected_column(&mut table));
        assert_eq!(table.hidden(), &[false; 4]);
        assert_eq!(sel.col, ColumnCursor::At(3));
    }
}
