pub mod ansi;
pub mod input;
pub mod lines;
pub mod terminal;
pub mod tui;
