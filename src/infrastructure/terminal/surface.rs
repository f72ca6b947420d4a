//! Buffered terminal output plus the cursor-position protocol.

use std::fmt;
use std::io::{Read, Write};
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use log::{debug, info, warn};

use crate::domain::primitive::{
    Color, CursorPos, Intensity, RequestId, SavedScreen, Style, TerminalSize,
};
use crate::infrastructure::ansi::AnsiWriter;
use crate::infrastructure::ansi::writer::{
    CLEAR_SCREEN, CURSOR_HOME, REPORT_CURSOR_POSITION, cursor_to,
};
use crate::infrastructure::input::{EventLoop, KeySubscription};
use crate::interface_adapter::port::{SurfacePort, TerminalModePort};
use crate::shared::config::ResolvedConfig;
use crate::shared::error::AppError;

/// The physical terminal for one session.
///
/// Owns the output buffer, the terminal mode and the background key decoder.
/// Opening switches the terminal to raw mode; [`Surface::close`] (or dropping
/// the surface) puts it back exactly once.
pub struct Surface<W: Write, M: TerminalModePort> {
    out: W,
    buf: Vec<u8>,
    writer: AnsiWriter,
    size: TerminalSize,
    mode: M,
    events: Option<EventLoop>,
    last_cursor: CursorPos,
    next_request: RequestId,
    cursor_timeout: Duration,
    closed: bool,
}

impl<W: Write, M: TerminalModePort> Surface<W, M> {
    /// Enable raw mode and start decoding `input` in the background.
    pub fn open<R>(
        out: W,
        input: R,
        mut mode: M,
        size: TerminalSize,
        config: &ResolvedConfig,
    ) -> Result<Self, AppError>
    where
        R: Read + Send + 'static,
    {
        mode.enable()?;
        let events = match EventLoop::spawn(input, config.escape_timeout) {
            Ok(events) => events,
            Err(e) => {
                let _ = mode.restore();
                return Err(e);
            }
        };

        info!("Terminal surface opened ({}x{})", size.rows, size.cols);
        Ok(Self {
            out,
            buf: Vec::new(),
            writer: AnsiWriter::new(config.color),
            size,
            mode,
            events: Some(events),
            last_cursor: CursorPos::default(),
            next_request: RequestId::new(1),
            cursor_timeout: config.cursor_report_timeout,
            closed: false,
        })
    }

    /// Take over the decoded key stream.
    pub fn subscribe(&mut self) -> Result<KeySubscription, AppError> {
        self.events
            .as_mut()
            .ok_or(AppError::EventLoopStopped)?
            .subscribe()
    }

    /// Ask the terminal where its cursor is.
    ///
    /// The query bypasses the output buffer. If no report arrives within the
    /// configured timeout the last known position is returned instead;
    /// `(0, 0)` before any report has ever arrived.
    pub fn cursor_pos(&mut self) -> Result<CursorPos, AppError> {
        let id = self.next_request;
        self.next_request = id.next();

        let reply = self
            .events
            .as_ref()
            .ok_or(AppError::EventLoopStopped)?
            .request_cursor(id)?;

        self.out
            .write_all(REPORT_CURSOR_POSITION)
            .and_then(|()| self.out.flush())
            .map_err(AppError::Output)?;

        match reply.recv_timeout(self.cursor_timeout) {
            Ok(pos) => {
                debug!("Cursor request {id}: {pos}");
                self.last_cursor = pos;
            }
            Err(RecvTimeoutError::Timeout) => warn!(
                "Cursor request {id} timed out after {:?}; using {}",
                self.cursor_timeout, self.last_cursor
            ),
            Err(RecvTimeoutError::Disconnected) => {
                debug!("Cursor request {id} dropped: input closed")
            }
        }
        Ok(self.last_cursor)
    }

    /// Bytes queued since the last flush or clear.
    #[cfg(test)]
    pub fn pending_output(&self) -> &[u8] {
        &self.buf
    }

    /// Stop the key decoder, reset the rendition and restore the terminal
    /// mode. Only the first call does anything.
    pub fn close(&mut self) -> Result<(), AppError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if let Some(mut events) = self.events.take() {
            events.shutdown();
        }
        self.writer.force_reset(&mut self.buf);
        let flushed = self.flush();
        let restored = self.mode.restore();
        info!("Terminal surface closed");
        flushed.and(restored)
    }
}

impl<W: Write, M: TerminalModePort> SurfacePort for Surface<W, M> {
    fn size(&self) -> TerminalSize {
        self.size
    }

    fn clear(&mut self) -> &mut Self {
        self.buf.clear();
        self.writer.forget();
        self.writer.write_raw(&mut self.buf, CLEAR_SCREEN);
        self.writer.write_raw(&mut self.buf, CURSOR_HOME);
        self
    }

    fn goto(&mut self, row: u16, col: u16) -> &mut Self {
        cursor_to(&mut self.buf, row, col);
        self
    }

    fn fg(&mut self, color: Color) -> &mut Self {
        self.writer.fg(color);
        self
    }

    fn bg(&mut self, color: Color) -> &mut Self {
        self.writer.bg(color);
        self
    }

    fn intensity(&mut self, intensity: Intensity) -> &mut Self {
        self.writer.intensity(intensity);
        self
    }

    fn style(&mut self, style: Style) -> &mut Self {
        self.writer.style(style);
        self
    }

    fn print(&mut self, text: &str) -> &mut Self {
        self.writer.print(&mut self.buf, text);
        self
    }

    fn print_fmt(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        self.writer.print_fmt(&mut self.buf, args);
        self
    }

    fn reset(&mut self) -> &mut Self {
        self.writer.reset(&mut self.buf);
        self
    }

    fn save_screen(&self) -> SavedScreen {
        SavedScreen::new(self.buf.clone())
    }

    fn restore_screen(&mut self, saved: &SavedScreen) -> &mut Self {
        self.clear();
        self.writer.write_raw(&mut self.buf, saved.as_bytes());
        // The snapshot may end in any rendition.
        self.writer.forget();
        self
    }

    fn flush(&mut self) -> Result<(), AppError> {
        let written = self
            .out
            .write_all(&self.buf)
            .and_then(|()| self.out.flush());
        self.buf.clear();
        self.writer.forget();
        written.map_err(AppError::Output)
    }
}

impl<W: Write, M: TerminalModePort> Drop for Surface<W, M> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to close terminal surface: {e}");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
