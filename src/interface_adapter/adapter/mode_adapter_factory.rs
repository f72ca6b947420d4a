use crate::infrastructure::terminal::CrosstermRawMode;

/// Creates the concrete TerminalModePort implementation.
pub fn create_raw_mode_adapter() -> CrosstermRawMode {
    CrosstermRawMode::new()
}
