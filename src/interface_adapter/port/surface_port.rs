use std::fmt;

use crate::domain::primitive::{Color, Intensity, SavedScreen, Style, TerminalSize};
use crate::shared::error::AppError;

/// Buffered drawing surface port.
///
/// Defines the boundary between the pager usecase and the terminal. Every
/// call except `flush` only appends to a pending output buffer; `flush` is
/// the single point where bytes reach the physical terminal. Style setters
/// return `&mut Self` so calls chain:
///
/// ```ignore
/// surface.goto(2, 2).intensity(Intensity::Bold).fg(Color::Green).print("id");
/// ```
///
/// Concrete implementation (`Surface`) lives in infrastructure.
pub trait SurfacePort {
    /// Terminal dimensions captured when the surface was opened.
    fn size(&self) -> TerminalSize;

    /// Discard anything pending and queue clear-screen + cursor-home.
    fn clear(&mut self) -> &mut Self;

    /// Queue absolute cursor positioning, 1-indexed. No bounds checking.
    fn goto(&mut self, row: u16, col: u16) -> &mut Self;

    fn fg(&mut self, color: Color) -> &mut Self;

    fn bg(&mut self, color: Color) -> &mut Self;

    fn intensity(&mut self, intensity: Intensity) -> &mut Self;

    /// Replace the whole pending style at once.
    fn style(&mut self, style: Style) -> &mut Self;

    /// Queue text, preceded by one escape sequence for any pending style change.
    fn print(&mut self, text: &str) -> &mut Self;

    /// `print` for `format_args!` output, without an intermediate `String`
    /// when the arguments are a plain literal.
    fn print_fmt(&mut self, args: fmt::Arguments<'_>) -> &mut Self;

    /// Return to the terminal's default rendition.
    fn reset(&mut self) -> &mut Self;

    /// Snapshot of the pending buffer.
    fn save_screen(&self) -> SavedScreen;

    /// Replace the pending buffer with clear-screen followed by `saved`.
    fn restore_screen(&mut self, saved: &SavedScreen) -> &mut Self;

    /// Write everything pending to the terminal and empty the buffer.
    fn flush(&mut self) -> Result<(), AppError>;
}
