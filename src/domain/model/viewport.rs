/// Rows of the terminal not available to scrolling data: the frame border
/// (top and bottom), the header, its separator and two blank rows above the
/// bottom border.
pub const CHROME_ROWS: usize = 6;

/// Vertical step of a plain arrow key.
pub const ROW_STEP: usize = 1;
/// Horizontal step of a plain arrow key.
pub const COL_STEP: usize = 2;
/// Extra distance added to an arrow step while Control is held.
pub const CONTROL_BOOST: usize = 3;
/// Vertical step of PageUp / PageDown.
pub const PAGE_STEP: usize = 5;

/// Scroll offsets into a [`LineBuffer`](super::LineBuffer).
///
/// `row` is the index of the first data line shown under the header and is
/// never below 1 (line 0 is the header). `col` is the number of display
/// columns cut from the left of every line.
///
/// There is deliberately no upper bound on `col`: lines are fixed-width
/// formatted, and scrolling past the widest line just shows blank padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    row: usize,
    col: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { row: 1, col: 0 }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Largest valid `row` for a buffer of `total_lines` shown in a terminal
    /// `visible_rows` high. Never below 1.
    pub fn max_row(total_lines: usize, visible_rows: usize) -> usize {
        (total_lines + CHROME_ROWS).saturating_sub(visible_rows).max(1)
    }

    /// Move by a signed delta and clamp back into range.
    pub fn scroll_by(
        &mut self,
        rows: isize,
        cols: isize,
        total_lines: usize,
        visible_rows: usize,
    ) {
        self.row = self.row.saturating_add_signed(rows);
        self.col = self.col.saturating_add_signed(cols);
        self.clamp(total_lines, visible_rows);
    }

    pub fn clamp(&mut self, total_lines: usize, visible_rows: usize) {
        self.row = self.row.min(Self::max_row(total_lines, visible_rows)).max(1);
    }
}
