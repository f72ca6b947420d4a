use std::io;
use std::os::fd::RawFd;

use log::warn;

use crate::domain::primitive::TerminalSize;
use crate::shared::error::AppError;

/// Ask the terminal behind `fd` for its dimensions.
pub fn query_size(fd: RawFd) -> Result<TerminalSize, AppError> {
    let mut ws = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: `fd` is only read by the kernel, and `ws` is a valid, writable
    // winsize that outlives the call.
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };
    if result == -1 {
        return Err(AppError::TerminalQuery(io::Error::last_os_error()));
    }

    let size = TerminalSize::new(ws.ws_row, ws.ws_col);
    if size.is_empty() {
        return Err(AppError::TerminalQuery(io::Error::other(
            "terminal reported a zero size",
        )));
    }
    Ok(size)
}

/// [`query_size`], falling back to `fallback` when `fd` is not a terminal.
pub fn detect_size(fd: RawFd, fallback: TerminalSize) -> TerminalSize {
    match query_size(fd) {
        Ok(size) => size,
        Err(e) => {
            warn!("{e}; assuming {}x{}", fallback.rows, fallback.cols);
            fallback
        }
    }
}
