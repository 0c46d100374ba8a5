use ratatui::{backend::Backend, style::Color};

use crate::screen::Screen;
use crate::selection::{ColumnCursor, Selection};
use crate::string::truncate_to_width;
use crate::style::Palette;
use crate::table::Table;
use crate::viewport::Geometry;

/// Draws single table rows onto the screen for one viewport geometry
pub struct RowRenderer<'a> {
    table: &'a Table,
    geometry: Geometry,
    selection: &'a Selection,
    palette: &'a Palette,
}

impl<'a> RowRenderer<'a> {
    pub fn new(
        table: &'a Table,
        geometry: Geometry,
        selection: &'a Selection,
        palette: &'a Palette,
    ) -> Self {
        Self { table, geometry, selection, palette }
    }

    /// (fg, bg) for a cell.
    ///
    /// Columns alternate between the two base colors. The header row and the
    /// selected row each flip that parity once more, and the selected row draws
    /// with the selection color in place of `fg`. The selected column swaps
    /// `bg` for its highlight color wherever `bg` ends up.
    pub fn cell_colors(&self, col: usize, is_header: bool, is_selected_row: bool) -> (Color, Color) {
        let light = if is_selected_row { self.palette.selection } else { self.palette.fg };
        let dark = if self.selection.col == ColumnCursor::At(col) {
            self.palette.selected_column
        } else {
            self.palette.bg
        };

        let inverted = (col % 2 == 1) ^ is_header ^ is_selected_row;
        if inverted {
            (dark.into(), light.into())
        } else {
            (light.into(), dark.into())
        }
    }

    /// Draw `source_row` of the table at `screen_row`.
    ///
    /// Starts at the geometry's first column shifted left by its leading skip.
    /// The last column that does not fit is truncated to the remaining width;
    /// if nothing of it fits the row ends there. Does not flush.
    pub fn render<B: Backend>(
        &self,
        screen: &mut Screen<B>,
        source_row: usize,
        screen_row: usize,
        screen_width: usize,
    ) {
        let Some(cells) = self.table.get_row(source_row) else {
            return;
        };
        let is_header = source_row == 0;
        let is_selected = self.selection.row == screen_row;
        let width = screen_width as i32;
        let y = screen_row as i32;

        let mut x = -(self.geometry.leading_skip as i32);
        for col in self.geometry.first_col..self.table.col_count() {
            if x >= width {
                break;
            }
            if self.table.is_hidden(col) {
                continue;
            }

            let col_width = self.table.col_width(col) as i32;
            let mut text = cells[col].as_str();
            if x + col_width > width {
                text = truncate_to_width(text, (width - x) as usize);
                if text.is_empty() {
                    break;
                }
            }

            let (fg, bg) = self.cell_colors(col, is_header, is_selected);
            let text_end = screen.draw_str(text, x, y, fg, bg);
            for pad_x in text_end..(x + col_width).min(width) {
                screen.set_cell(pad_x, y, ' ', fg, bg);
            }

            x += col_width;
        }
    }
}
