use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::Path;

use log::debug;

use crate::domain::model::LineBuffer;
use crate::shared::error::AppError;

/// Load display lines from `path`, or from stdin when no path is given.
///
/// Stdin is only used when something is piped in; an interactive stdin is
/// [`AppError::NoInput`].
pub fn load_lines(path: Option<&Path>) -> Result<LineBuffer, AppError> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(AppError::Lines)?;
            debug!("Reading display lines from {}", path.display());
            read_lines(BufReader::new(file))
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(AppError::NoInput);
            }
            debug!("Reading display lines from stdin");
            read_lines(stdin.lock())
        }
    }
}

/// Read one display line per input line. Control characters are blanked so
/// they cannot act as terminal commands when printed.
pub fn read_lines<R: BufRead>(reader: R) -> Result<LineBuffer, AppError> {
    let lines = reader
        .lines()
        .map(|line| line.map(|l| sanitize(&l)))
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::Lines)?;
    debug!("Read {} display lines", lines.len());
    Ok(LineBuffer::new(lines))
}

fn sanitize(line: &str) -> String {
    line.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
