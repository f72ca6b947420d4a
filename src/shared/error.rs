use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Failed to query terminal size: {0}")]
    TerminalQuery(#[source] std::io::Error),

    #[error("Failed to write to terminal: {0}")]
    Output(#[source] std::io::Error),

    #[error("Failed to read terminal input: {0}")]
    Input(#[source] std::io::Error),

    #[error("TUI error: {0}")]
    Tui(#[source] std::io::Error),

    #[error("Failed to spawn {name} thread: {source}")]
    ThreadSpawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Key decoder is not running")]
    EventLoopStopped,

    #[error("Failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read display lines: {0}")]
    Lines(#[source] std::io::Error),

    #[error("No input: pass a file or pipe display lines on stdin")]
    NoInput,
}
