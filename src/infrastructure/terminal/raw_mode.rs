use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::debug;

use crate::interface_adapter::port::TerminalModePort;
use crate::shared::error::AppError;

/// Raw mode on the controlling terminal via crossterm.
///
/// `restore` is a no-op unless this adapter enabled raw mode itself.
#[derive(Debug, Default)]
pub struct CrosstermRawMode {
    enabled: bool,
}

impl CrosstermRawMode {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TerminalModePort for CrosstermRawMode {
    fn enable(&mut self) -> Result<(), AppError> {
        enable_raw_mode().map_err(AppError::Tui)?;
        self.enabled = true;
        debug!("Raw mode enabled");
        Ok(())
    }

    fn restore(&mut self) -> Result<(), AppError> {
        if !self.enabled {
            return Ok(());
        }
        self.enabled = false;
        disable_raw_mode().map_err(AppError::Tui)?;
        debug!("Raw mode restored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_without_enable_is_noop() {
        let mut mode = CrosstermRawMode::new();
        assert!(mode.restore().is_ok());
    }
}
