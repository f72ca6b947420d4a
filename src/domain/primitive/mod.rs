pub mod cursor_pos;
pub mod saved_screen;
pub mod style;
pub mod terminal_size;

pub use cursor_pos::{CursorPos, RequestId};
pub use saved_screen::SavedScreen;
pub use style::{Color, Intensity, Style, Theme};
pub use terminal_size::TerminalSize;
