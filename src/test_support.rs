//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use unicode_width::UnicodeWidthChar;

use crate::domain::primitive::{Color, Intensity, Style, TerminalSize};
use crate::infrastructure::terminal::Surface;
use crate::interface_adapter::port::TerminalModePort;
use crate::shared::config::ResolvedConfig;
use crate::shared::error::AppError;

/// Writer whose contents stay readable after it has been moved into a surface.
#[derive(Clone, Default)]
pub struct SharedBuf {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuf {
    pub fn contents(&self) -> Vec<u8> {
        self.bytes.lock().unwrap().clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Blocking reader fed from a channel. Dropping the sender is end of input.
pub struct ChannelReader {
    rx: Receiver<Vec<u8>>,
    leftover: Vec<u8>,
}

pub fn channel_reader() -> (Sender<Vec<u8>>, ChannelReader) {
    let (tx, rx) = mpsc::channel();
    (
        tx,
        ChannelReader {
            rx,
            leftover: Vec::new(),
        },
    )
}

impl Read for ChannelReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.leftover.is_empty() {
            match self.rx.recv() {
                Ok(bytes) => self.leftover = bytes,
                Err(_) => return Ok(0),
            }
        }
        let n = buf.len().min(self.leftover.len());
        buf[..n].copy_from_slice(&self.leftover[..n]);
        self.leftover.drain(..n);
        Ok(n)
    }
}

/// Output side of a fake terminal: records everything written and, when a
/// reply is configured, answers each cursor-position query on the key channel
/// the way a real terminal would.
#[derive(Clone)]
pub struct SimulatedTerminal {
    pub output: SharedBuf,
    keys: Sender<Vec<u8>>,
    reply: Arc<Mutex<Option<Vec<u8>>>>,
}

impl SimulatedTerminal {
    /// Terminal that answers cursor queries with `ESC[12;34R`.
    pub fn new() -> (Self, ChannelReader) {
        let (keys, reader) = channel_reader();
        let terminal = Self {
            output: SharedBuf::default(),
            keys,
            reply: Arc::new(Mutex::new(Some(b"\x1b[12;34R".to_vec()))),
        };
        (terminal, reader)
    }

    pub fn set_reply(&self, reply: Option<&[u8]>) {
        *self.reply.lock().unwrap() = reply.map(<[u8]>::to_vec);
    }

    /// Simulate the user typing `bytes`.
    pub fn type_keys(&self, bytes: &[u8]) {
        let _ = self.keys.send(bytes.to_vec());
    }
}

impl Write for SimulatedTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)?;
        let asks_cursor = buf.windows(4).any(|w| w == b"\x1b[6n");
        if asks_cursor && let Some(reply) = self.reply.lock().unwrap().clone() {
            let _ = self.keys.send(reply);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Mode port that only counts calls.
#[derive(Clone, Default)]
pub struct RecordingMode {
    enabled: Arc<AtomicUsize>,
    restored: Arc<AtomicUsize>,
}

impl RecordingMode {
    pub fn enable_count(&self) -> usize {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn restore_count(&self) -> usize {
        self.restored.load(Ordering::SeqCst)
    }
}

impl TerminalModePort for RecordingMode {
    fn enable(&mut self) -> Result<(), AppError> {
        self.enabled.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn restore(&mut self) -> Result<(), AppError> {
        self.restored.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Surface over a [`SharedBuf`] with no keyboard attached.
pub fn open_test_surface(size: TerminalSize) -> (Surface<SharedBuf, RecordingMode>, SharedBuf) {
    let out = SharedBuf::default();
    let (_keys, reader) = channel_reader();
    let config = ResolvedConfig {
        cursor_report_timeout: Duration::from_millis(50),
        ..ResolvedConfig::default()
    };
    let surface = Surface::open(out.clone(), reader, RecordingMode::default(), size, &config)
        .expect("open test surface");
    (surface, out)
}

// =============================================================================
// ScreenModel: what a VT100 would show after receiving some output
// =============================================================================

const PALETTE: [Color; 8] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

/// Minimal terminal emulator covering the sequences the pager emits:
/// cursor positioning, clear screen and SGR.
pub struct ScreenModel {
    parser: vte::Parser,
    grid: Grid,
}

struct Grid {
    cells: Vec<Vec<(char, Style)>>,
    row: usize,
    col: usize,
    style: Style,
}

impl ScreenModel {
    pub fn new(size: TerminalSize) -> Self {
        Self {
            parser: vte::Parser::new(),
            grid: Grid {
                cells: vec![vec![(' ', Style::DEFAULT); size.cols as usize]; size.rows as usize],
                row: 0,
                col: 0,
                style: Style::DEFAULT,
            },
        }
    }

    pub fn from_bytes(size: TerminalSize, bytes: &[u8]) -> Self {
        let mut screen = Self::new(size);
        screen.feed(bytes);
        screen
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        self.parser.advance(&mut self.grid, bytes);
    }

    /// Text of a 1-indexed row with trailing blanks removed.
    pub fn row_text(&self, row: u16) -> String {
        self.grid.cells[row as usize - 1]
            .iter()
            .map(|(c, _)| *c)
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    /// Style of a 1-indexed cell.
    pub fn style_at(&self, row: u16, col: u16) -> Style {
        self.grid.cells[row as usize - 1][col as usize - 1].1
    }
}

impl vte::Perform for Grid {
    fn print(&mut self, c: char) {
        if let Some(cell) = self.cells.get_mut(self.row).and_then(|r| r.get_mut(self.col)) {
            *cell = (c, self.style);
        }
        self.col += UnicodeWidthChar::width(c).unwrap_or(1).max(1);
    }

    fn csi_dispatch(&mut self, params: &vte::Params, _intermediates: &[u8], _ignore: bool, action: char) {
        let params: Vec<u16> = params.iter().map(|p| p[0]).collect();
        match action {
            'H' => {
                self.row = params.first().copied().unwrap_or(1).max(1) as usize - 1;
                self.col = params.get(1).copied().unwrap_or(1).max(1) as usize - 1;
            }
            'J' if params.first() == Some(&2) => {
                for row in &mut self.cells {
                    row.fill((' ', Style::DEFAULT));
                }
            }
            'm' => {
                for p in params {
                    match p {
                        0 => self.style = Style::DEFAULT,
                        1 => self.style.intensity = Intensity::Bold,
                        2 => self.style.intensity = Intensity::Faint,
                        22 => self.style.intensity = Intensity::Normal,
                        30..=37 => self.style.fg = PALETTE[(p - 30) as usize],
                        39 => self.style.fg = Color::Default,
                        40..=47 => self.style.bg = PALETTE[(p - 40) as usize],
                        49 => self.style.bg = Color::Default,
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
}
