use crate::table::Table;

/// Where the horizontal scroll offset lands on actual column boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    /// First (partially) visible column
    pub first_col: usize,
    /// Cells of `first_col` scrolled off the left edge
    pub leading_skip: usize,
}

impl Geometry {
    /// Translate `scroll_x` into the first visible column and the number of its
    /// cells cut off on the left. Hidden columns take no space. The walk stops on
    /// the last visible column even if scroll budget remains.
    pub fn compute(scroll_x: usize, widths: &[usize], hidden: &[bool]) -> Self {
        let is_hidden = |col: usize| hidden.get(col).copied().unwrap_or(false);
        let mut visible = (0..widths.len()).filter(|col| !is_hidden(*col)).peekable();

        let mut to_skip = scroll_x;
        while let Some(col) = visible.next() {
            let is_last = visible.peek().is_none();
            if to_skip > 0 && to_skip >= widths[col] && !is_last {
                to_skip -= widths[col];
                continue;
            }
            return Self {
                first_col: col,
                leading_skip: to_skip,
            };
        }

        Self::default()
    }
}

/// True when content extends past the right edge of the screen
pub fn can_scroll_right(scroll_x: usize, screen_width: usize, visible_width: usize) -> bool {
    scroll_x + screen_width < visible_width
}

/// True when rows remain below the bottom edge of the screen
pub fn can_scroll_down(scroll_y: usize, screen_height: usize, row_count: usize) -> bool {
    scroll_y + screen_height < row_count
}

/// Scroll offsets plus the geometry derived from them
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    /// Display cells scrolled horizontally
    pub scroll_x: usize,
    /// Data rows scrolled past; the header never scrolls
    pub scroll_y: usize,
    geometry: Geometry,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Recompute geometry from `scroll_x` and the table's hidden flags
    pub fn recompute(&mut self, table: &Table) {
        self.geometry = Geometry::compute(self.scroll_x, table.col_widths(), table.hidden());
    }

    /// Content is cut off on the right at this screen width
    pub fn trimmed(&self, table: &Table, screen_width: usize) -> bool {
        can_scroll_right(self.scroll_x, screen_width, table.visible_width())
    }

    pub fn scroll_left(&mut self) -> bool {
        if self.scroll_x == 0 {
            return false;
        }
        self.scroll_x -= 1;
        true
    }

    pub fn scroll_right(&mut self, table: &Table, screen_width: usize) -> bool {
        if !self.trimmed(table, screen_width) {
            return false;
        }
        self.scroll_x += 1;
        true
    }

    pub fn scroll_up(&mut self) -> bool {
        if self.scroll_y == 0 {
            return false;
        }
        self.scroll_y -= 1;
        true
    }

    pub fn scroll_down(&mut self, table: &Table, screen_height: usize) -> bool {
        if !can_scroll_down(self.scroll_y, screen_height, table.row_count()) {
            return false;
        }
        self.scroll_y += 1;
        true
    }

    /// Pull `scroll_x` back so no more than the visible content is scrolled past
    /// (used after the visible width shrinks)
    pub fn clamp_x(&mut self, table: &Table, screen_width: usize) {
        let max = table.visible_width().saturating_sub(screen_width);
        if self.scroll_x > max {
            self.scroll_x = max;
        }
    }
}
