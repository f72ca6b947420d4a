use crate::interface_adapter::port::SurfacePort;

const TOP_LEFT: &str = "┌";
const TOP_RIGHT: &str = "┐";
const BOTTOM_LEFT: &str = "└";
const BOTTOM_RIGHT: &str = "┘";
const HORIZONTAL: &str = "─";
const VERTICAL: &str = "│";

/// Box-drawn frame at a fixed position.
///
/// `row_size` is the distance from the top border to the bottom border and
/// `col_size` the number of interior columns, so the frame covers columns
/// `col..=col + col_size + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    row: u16,
    col: u16,
    row_size: u16,
    col_size: u16,
}

impl Window {
    pub fn new(row: u16, col: u16, row_size: u16, col_size: u16) -> Self {
        Self {
            row,
            col,
            row_size,
            col_size,
        }
    }

    /// Queue the border. Interior cells are left as they are.
    pub fn draw<S: SurfacePort>(&self, surface: &mut S) {
        let horizontal = HORIZONTAL.repeat(self.col_size as usize);
        surface
            .goto(self.row, self.col)
            .print(TOP_LEFT)
            .print(&horizontal)
            .print(TOP_RIGHT);
        surface
            .goto(self.row.saturating_add(self.row_size), self.col)
            .print(BOTTOM_LEFT)
            .print(&horizontal)
            .print(BOTTOM_RIGHT);

        let right = self.col.saturating_add(self.col_size).saturating_add(1);
        for i in 1..self.row_size {
            let row = self.row.saturating_add(i);
            surface.goto(row, self.col).print(VERTICAL);
            surface.goto(row, right).print(VERTICAL);
        }
    }

    /// Blank the interior without touching the border.
    pub fn clear<S: SurfacePort>(&self, surface: &mut S) {
        let blank = " ".repeat(self.col_size as usize);
        for i in 1..self.row_size {
            surface
                .goto(self.row.saturating_add(i), self.col.saturating_add(1))
                .print(&blank);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::primitive::TerminalSize;
    use crate::test_support::{ScreenModel, open_test_surface};

    #[test]
    fn draw_places_corners_and_edges() {
        let (mut surface, out) = open_test_surface(TerminalSize::new(10, 20));
        Window::new(1, 1, 4, 5).draw(&mut surface);
        surface.flush().unwrap();

        let screen = ScreenModel::from_bytes(TerminalSize::new(10, 20), &out.contents());
        assert_eq!(screen.row_text(1), "┌─────┐");
        assert_eq!(screen.row_text(2), "│     │");
        assert_eq!(screen.row_text(4), "│     │");
        assert_eq!(screen.row_text(5), "└─────┘");
        assert_eq!(screen.row_text(6), "");
    }

    #[test]
    fn redraw_is_byte_identical() {
        let (mut surface, _) = open_test_surface(TerminalSize::FALLBACK);
        let window = Window::new(2, 3, 6, 10);

        surface.clear();
        window.draw(&mut surface);
        let first = surface.pending_output().to_vec();
        surface.clear();
        window.draw(&mut surface);

        assert_eq!(surface.pending_output(), first.as_slice());
    }

    #[test]
    fn clear_blanks_interior_only() {
        let size = TerminalSize::new(10, 20);
        let (mut surface, out) = open_test_surface(size);
        let window = Window::new(1, 1, 3, 4);
        window.draw(&mut surface);
        surface.goto(2, 2).print("abcd");
        window.clear(&mut surface);
        surface.flush().unwrap();

        let screen = ScreenModel::from_bytes(size, &out.contents());
        assert_eq!(screen.row_text(1), "┌────┐");
        assert_eq!(screen.row_text(2), "│    │");
    }
}
