use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::primitive::CursorPos;

/// One decoded unit of keyboard input, as delivered to the active subscriber.
///
/// Every variant that came from the input stream carries the exact bytes it
/// consumed, so nothing typed is ever lost without a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// A named key or printable character, with modifiers.
    Key { event: KeyEvent, raw: Vec<u8> },
    /// A sequence outside the decoding table, passed through literally.
    Unrecognized { raw: Vec<u8> },
    /// Reading the input device failed.
    Error { message: String },
}

impl KeyInput {
    pub fn key(code: KeyCode, modifiers: KeyModifiers, raw: Vec<u8>) -> Self {
        Self::Key {
            event: KeyEvent::new(code, modifiers),
            raw,
        }
    }

    #[cfg(test)]
    pub fn key_event(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key { event, .. } => Some(event),
            _ => None,
        }
    }

    pub fn raw(&self) -> &[u8] {
        match self {
            Self::Key { raw, .. } | Self::Unrecognized { raw } => raw,
            Self::Error { .. } => &[],
        }
    }
}

/// Decoder output: input for the subscriber, or a terminal reply to a
/// cursor-position request (never shown to the subscriber).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Input(KeyInput),
    CursorReport { pos: CursorPos, raw: Vec<u8> },
}

impl Decoded {
    #[cfg(test)]
    pub fn raw(&self) -> &[u8] {
        match self {
            Self::Input(input) => input.raw(),
            Self::CursorReport { raw, .. } => raw,
        }
    }
}
