/// Physical terminal dimensions, 1 cell = 1 row/column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub rows: u16,
    pub cols: u16,
}

impl TerminalSize {
    /// Used when the size query fails (no tty, unsupported platform).
    pub const FALLBACK: TerminalSize = TerminalSize { rows: 24, cols: 80 };

    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// A size of zero in either dimension is what some pseudo terminals report
    /// before they are attached; it is never usable for layout.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl Default for TerminalSize {
    fn default() -> Self {
        Self::FALLBACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_classic_vt100_size() {
        let size = TerminalSize::default();
        assert_eq!(size.rows, 24);
        assert_eq!(size.cols, 80);
    }

    #[test]
    fn zero_dimension_is_empty() {
        assert!(TerminalSize::new(0, 80).is_empty());
        assert!(TerminalSize::new(24, 0).is_empty());
        assert!(!TerminalSize::new(1, 1).is_empty());
    }
}
