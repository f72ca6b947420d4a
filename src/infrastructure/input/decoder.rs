//! Raw keyboard bytes → [`Decoded`] events.
//!
//! Escape sequences are recognized with the `vte` state machine. A sequence
//! that is still incomplete stays held in `pending` until either more bytes
//! complete it or the caller decides it has waited long enough and calls
//! [`KeyDecoder::flush_pending`], which turns whatever is held into a literal
//! event. That is how a lone ESC press is told apart from the start of an
//! arrow key.
//!
//! Every byte fed in ends up in the `raw` of exactly one event.

use crossterm::event::{KeyCode, KeyModifiers};
use vte::{Params, Parser, Perform};

use super::event::{Decoded, KeyInput};
use crate::domain::primitive::CursorPos;

const ESC: u8 = 0x1B;
const DEL: u8 = 0x7F;

pub struct KeyDecoder {
    parser: Parser,
    sink: Sink,
}

/// `vte::Perform` target collecting events for one `feed` call.
#[derive(Default)]
struct Sink {
    /// Bytes consumed since the last emitted event.
    pending: Vec<u8>,
    /// `ESC O` seen; the next printable selects an SS3 key.
    ss3: bool,
    out: Vec<Decoded>,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            sink: Sink::default(),
        }
    }

    /// Decode `bytes`, returning every event they complete.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Decoded> {
        for &byte in bytes {
            self.feed_byte(byte);
        }
        std::mem::take(&mut self.sink.out)
    }

    /// Whether a partial sequence is being held.
    pub fn has_pending(&self) -> bool {
        !self.sink.pending.is_empty()
    }

    /// Give up waiting on a held partial sequence and report it as-is.
    pub fn flush_pending(&mut self) -> Vec<Decoded> {
        self.flush_held();
        std::mem::take(&mut self.sink.out)
    }

    fn feed_byte(&mut self, byte: u8) {
        // A new ESC always starts a new sequence; whatever was held is done.
        if byte == ESC && self.has_pending() {
            self.flush_held();
        }
        if is_control(byte) {
            if byte == DEL && self.sink.pending == [ESC] {
                self.sink.pending.push(byte);
                self.flush_held();
                return;
            }
            // Controls never join a sequence; anything held is reported first.
            self.flush_held();
            self.sink.emit_control(byte, vec![byte]);
            return;
        }
        self.sink.pending.push(byte);
        self.parser.advance(&mut self.sink, &[byte]);
    }

    fn flush_held(&mut self) {
        let raw = std::mem::take(&mut self.sink.pending);
        self.sink.ss3 = false;
        self.parser = Parser::new();
        if !raw.is_empty() {
            self.sink.out.push(Decoded::Input(literal(raw)));
        }
    }
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink {
    fn take_raw(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.pending)
    }

    fn emit_key(&mut self, code: KeyCode, modifiers: KeyModifiers, raw: Vec<u8>) {
        self.out
            .push(Decoded::Input(KeyInput::key(code, modifiers, raw)));
    }

    fn emit_unrecognized(&mut self, raw: Vec<u8>) {
        self.out.push(Decoded::Input(KeyInput::Unrecognized { raw }));
    }

    fn emit_control(&mut self, byte: u8, raw: Vec<u8>) {
        match control_key(byte) {
            Some((code, modifiers)) => self.emit_key(code, modifiers, raw),
            None => self.emit_unrecognized(raw),
        }
    }
}

impl Perform for Sink {
    fn print(&mut self, c: char) {
        let raw = self.take_raw();
        if std::mem::take(&mut self.ss3) {
            match ss3_key(c) {
                Some((code, modifiers)) => self.emit_key(code, modifiers, raw),
                None => self.emit_unrecognized(raw),
            }
        } else {
            self.emit_key(KeyCode::Char(c), KeyModifiers::NONE, raw);
        }
    }

    fn execute(&mut self, byte: u8) {
        // `feed_byte` keeps C0 away from vte, so only C1 controls land here.
        let raw = if self.pending.last() == Some(&byte) {
            self.pending.pop();
            vec![byte]
        } else {
            Vec::new()
        };
        self.emit_control(byte, raw);
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        let raw = self.take_raw();
        self.ss3 = false;
        if ignore || !intermediates.is_empty() {
            self.emit_unrecognized(raw);
            return;
        }

        let params: Vec<u16> = params
            .iter()
            .map(|p| p.first().copied().unwrap_or(0))
            .collect();

        // Modified F3 (`CSI 1;<mod>R`) has this exact shape. It is read as a
        // cursor report, so Shift/Alt/Ctrl+F3 never reach a subscriber.
        if action == 'R' && params.len() == 2 {
            self.out.push(Decoded::CursorReport {
                pos: CursorPos::new(params[0], params[1]),
                raw,
            });
            return;
        }

        match csi_key(action, &params) {
            Some((code, modifiers)) => self.emit_key(code, modifiers, raw),
            None => self.emit_unrecognized(raw),
        }
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], _ignore: bool, byte: u8) {
        if intermediates.is_empty() && byte == b'O' {
            self.ss3 = true;
            return;
        }
        let raw = self.take_raw();
        if intermediates.is_empty() && is_printable(byte) {
            self.emit_key(KeyCode::Char(byte as char), KeyModifiers::ALT, raw);
        } else {
            self.emit_unrecognized(raw);
        }
    }

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {
        let raw = self.take_raw();
        self.emit_unrecognized(raw);
    }

    fn unhook(&mut self) {
        let raw = self.take_raw();
        self.emit_unrecognized(raw);
    }
}

fn is_control(byte: u8) -> bool {
    (byte < 0x20 && byte != ESC) || byte == DEL
}

fn is_printable(byte: u8) -> bool {
    (0x20..0x7F).contains(&byte)
}

/// A held sequence nobody completed: `ESC` alone is the Escape key, `ESC x`
/// is Alt+x, `ESC DEL` is Alt+Backspace, anything else is passed through.
fn literal(raw: Vec<u8>) -> KeyInput {
    let key = match raw.as_slice() {
        [ESC] => Some((KeyCode::Esc, KeyModifiers::NONE)),
        [ESC, DEL] => Some((KeyCode::Backspace, KeyModifiers::ALT)),
        &[ESC, b] if is_printable(b) => Some((KeyCode::Char(b as char), KeyModifiers::ALT)),
        _ => None,
    };
    match key {
        Some((code, modifiers)) => KeyInput::key(code, modifiers, raw),
        None => KeyInput::Unrecognized { raw },
    }
}

fn control_key(byte: u8) -> Option<(KeyCode, KeyModifiers)> {
    let key = match byte {
        b'\r' | b'\n' => (KeyCode::Enter, KeyModifiers::NONE),
        b'\t' => (KeyCode::Tab, KeyModifiers::NONE),
        0x08 | DEL => (KeyCode::Backspace, KeyModifiers::NONE),
        0x00 => (KeyCode::Char(' '), KeyModifiers::CONTROL),
        0x01..=0x1A => (KeyCode::Char((byte + 0x60) as char), KeyModifiers::CONTROL),
        0x1C..=0x1F => (KeyCode::Char((byte + 0x40) as char), KeyModifiers::CONTROL),
        _ => return None,
    };
    Some(key)
}

/// xterm modifier parameter: 1 + (shift | alt << 1 | ctrl << 2).
fn xterm_modifiers(param: Option<u16>) -> KeyModifiers {
    let bits = param.unwrap_or(1).saturating_sub(1);
    let mut modifiers = KeyModifiers::NONE;
    if bits & 1 != 0 {
        modifiers |= KeyModifiers::SHIFT;
    }
    if bits & 2 != 0 {
        modifiers |= KeyModifiers::ALT;
    }
    if bits & 4 != 0 {
        modifiers |= KeyModifiers::CONTROL;
    }
    modifiers
}

fn csi_key(action: char, params: &[u16]) -> Option<(KeyCode, KeyModifiers)> {
    let code = match action {
        'A' => KeyCode::Up,
        'B' => KeyCode::Down,
        'C' => KeyCode::Right,
        'D' => KeyCode::Left,
        'H' => KeyCode::Home,
        'F' => KeyCode::End,
        'P' => KeyCode::F(1),
        'Q' => KeyCode::F(2),
        'S' => KeyCode::F(4),
        'Z' => return Some((KeyCode::BackTab, KeyModifiers::SHIFT)),
        '~' => tilde_key(params.first().copied().unwrap_or(0))?,
        _ => return None,
    };
    Some((code, xterm_modifiers(params.get(1).copied())))
}

fn tilde_key(param: u16) -> Option<KeyCode> {
    let code = match param {
        1 | 7 => KeyCode::Home,
        2 => KeyCode::Insert,
        3 => KeyCode::Delete,
        4 | 8 => KeyCode::End,
        5 => KeyCode::PageUp,
        6 => KeyCode::PageDown,
        11..=15 => KeyCode::F((param - 10) as u8),
        17..=21 => KeyCode::F((param - 11) as u8),
        23 | 24 => KeyCode::F((param - 12) as u8),
        _ => return None,
    };
    Some(code)
}

fn ss3_key(c: char) -> Option<(KeyCode, KeyModifiers)> {
    let key = match c {
        'A' => (KeyCode::Up, KeyModifiers::NONE),
        'B' => (KeyCode::Down, KeyModifiers::NONE),
        'C' => (KeyCode::Right, KeyModifiers::NONE),
        'D' => (KeyCode::Left, KeyModifiers::NONE),
        'H' => (KeyCode::Home, KeyModifiers::NONE),
        'F' => (KeyCode::End, KeyModifiers::NONE),
        'M' => (KeyCode::Enter, KeyModifiers::NONE),
        'P' => (KeyCode::F(1), KeyModifiers::NONE),
        'Q' => (KeyCode::F(2), KeyModifiers::NONE),
        'R' => (KeyCode::F(3), KeyModifiers::NONE),
        'S' => (KeyCode::F(4), KeyModifiers::NONE),
        // rxvt sends Ctrl+arrows as lowercase SS3 finals.
        'a' => (KeyCode::Up, KeyModifiers::CONTROL),
        'b' => (KeyCode::Down, KeyModifiers::CONTROL),
        'c' => (KeyCode::Right, KeyModifiers::CONTROL),
        'd' => (KeyCode::Left, KeyModifiers::CONTROL),
        _ => return None,
    };
    Some(key)
}

// =============================================================================
// Tests
// =============================================================================
