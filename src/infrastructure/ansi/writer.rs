//! Stateful SGR writer.
//!
//! Style setters only record the wanted rendition. Nothing is emitted until
//! text is printed, at which point the difference between what the terminal
//! has and what is wanted is written as one escape sequence. Several setter
//! calls between two prints therefore collapse into a single sequence.

use std::fmt;

use crate::domain::primitive::{Color, Intensity, Style};

pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";
pub const CURSOR_HOME: &[u8] = b"\x1b[H";
pub const REPORT_CURSOR_POSITION: &[u8] = b"\x1b[6n";
pub const RESET_RENDITION: &[u8] = b"\x1b[0m";

/// Append `CSI row ; col H` (1-indexed absolute positioning).
pub fn cursor_to(out: &mut Vec<u8>, row: u16, col: u16) {
    out.extend_from_slice(format!("\x1b[{row};{col}H").as_bytes());
}

/// Encode a full SGR sequence for `style`.
pub fn sgr(style: &Style) -> Vec<u8> {
    let params = style
        .sgr_params()
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(";");
    format!("\x1b[{params}m").into_bytes()
}

/// Render context threaded explicitly through every drawing call.
///
/// `applied` is the rendition the terminal is known to have once the output
/// buffer reaches it, `None` when unknown (fresh terminal, or bytes that set
/// it were discarded). `pending` is what the next printed text should use.
#[derive(Debug, Clone)]
pub struct AnsiWriter {
    applied: Option<Style>,
    pending: Style,
    color: bool,
}

impl AnsiWriter {
    /// With `color == false` no SGR sequence is ever emitted by `print`.
    pub fn new(color: bool) -> Self {
        Self {
            applied: None,
            pending: Style::DEFAULT,
            color,
        }
    }

    pub fn fg(&mut self, color: Color) -> &mut Self {
        self.pending.fg = color;
        self
    }

    pub fn bg(&mut self, color: Color) -> &mut Self {
        self.pending.bg = color;
        self
    }

    pub fn intensity(&mut self, intensity: Intensity) -> &mut Self {
        self.pending.intensity = intensity;
        self
    }

    pub fn style(&mut self, style: Style) -> &mut Self {
        self.pending = style;
        self
    }

    pub fn print(&mut self, out: &mut Vec<u8>, text: &str) {
        self.apply(out);
        out.extend_from_slice(text.as_bytes());
    }

    pub fn print_fmt(&mut self, out: &mut Vec<u8>, args: fmt::Arguments<'_>) {
        self.apply(out);
        match args.as_str() {
            Some(s) => out.extend_from_slice(s.as_bytes()),
            None => out.extend_from_slice(args.to_string().as_bytes()),
        }
    }

    /// Raw bytes, no style prefix. Used for cursor and screen control.
    pub fn write_raw(&self, out: &mut Vec<u8>, bytes: &[u8]) {
        out.extend_from_slice(bytes);
    }

    /// Back to the default rendition. Emits a reset only when the terminal is
    /// not already known to be in it.
    pub fn reset(&mut self, out: &mut Vec<u8>) {
        self.pending = Style::DEFAULT;
        if self.color && self.applied != Some(Style::DEFAULT) {
            out.extend_from_slice(RESET_RENDITION);
        }
        self.applied = Some(Style::DEFAULT);
    }

    /// Unconditional reset, regardless of tracked state or color setting.
    pub fn force_reset(&mut self, out: &mut Vec<u8>) {
        out.extend_from_slice(RESET_RENDITION);
        self.pending = Style::DEFAULT;
        self.applied = Some(Style::DEFAULT);
    }

    /// Drop all tracked state: called whenever buffered bytes are handed off
    /// or thrown away, after which the terminal's rendition is not ours to know.
    pub fn forget(&mut self) {
        self.pending = Style::DEFAULT;
        self.applied = None;
    }

    fn apply(&mut self, out: &mut Vec<u8>) {
        if !self.color || self.applied == Some(self.pending) {
            return;
        }
        out.extend_from_slice(&sgr(&self.pending));
        self.applied = Some(self.pending);
    }
}
