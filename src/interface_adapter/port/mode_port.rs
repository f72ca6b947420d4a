use crate::shared::error::AppError;

/// Line-discipline control of the controlling terminal.
///
/// `enable` switches to raw (no echo, no line buffering) input so single key
/// presses reach the decoder; `restore` returns to the mode the terminal had
/// before. Concrete implementation (`CrosstermRawMode`) lives in infrastructure.
pub trait TerminalModePort: Send {
    fn enable(&mut self) -> Result<(), AppError>;

    fn restore(&mut self) -> Result<(), AppError>;
}
