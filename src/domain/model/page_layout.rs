use crate::domain::primitive::TerminalSize;

use super::viewport::CHROME_ROWS;

/// Fixed screen geometry of the pager for one terminal size (1-indexed).
///
/// ```text
/// row 1          ┌──────────────── [f/c] ┐   frame top + position echo
/// row 2          │ header                 │
/// row 3          │ ━━━━━━━━━━━━━━━━━━━━━━ │
/// rows 4..R-3    │ data lines             │
/// rows R-2..R-1  │ (blank)                │
/// row R          └────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub size: TerminalSize,
    pub status_row: u16,
    pub status_col: u16,
    pub header_row: u16,
    pub separator_row: u16,
    pub first_data_row: u16,
    /// Number of data lines shown under the header.
    pub data_rows: usize,
    /// Last row of the frame interior; rows after the data window up to here
    /// are blanked on every render.
    pub last_text_row: u16,
    pub text_col: u16,
    pub text_width: usize,
}

impl PageLayout {
    pub fn for_size(size: TerminalSize) -> Self {
        Self {
            size,
            status_row: 1,
            status_col: size.cols.saturating_sub(15).max(1),
            header_row: 2,
            separator_row: 3,
            first_data_row: 4,
            data_rows: (size.rows as usize).saturating_sub(CHROME_ROWS),
            last_text_row: size.rows.saturating_sub(1),
            text_col: 2,
            text_width: (size.cols as usize).saturating_sub(3),
        }
    }

    /// Frame rectangle as `(top, left, height, width)` where height/width
    /// count the interior plus one border line, as the window drawer expects.
    pub fn frame(&self) -> (u16, u16, u16, u16) {
        (
            1,
            1,
            self.size.rows.saturating_sub(1),
            self.size.cols.saturating_sub(2),
        )
    }
}
