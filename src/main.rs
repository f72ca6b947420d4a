mod domain;
mod usecase;
mod interface_adapter;
mod infrastructure;
mod shared;
#[cfg(test)]
mod test_support;

use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::AsRawFd;
use std::path::PathBuf;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::infrastructure::lines;
use crate::infrastructure::terminal::{Surface, detect_size};
use crate::infrastructure::tui::app_runner;
use crate::interface_adapter::adapter::mode_adapter_factory;
use crate::interface_adapter::controller::PagerController;
use crate::shared::config::{self, CliOverrides, ResolvedConfig};
use crate::shared::error::AppError;
use crate::usecase::PagerUsecase;

#[derive(Parser)]
#[command(name = "tpg", about = "Scroll pre-formatted table lines in the terminal")]
struct Args {
    /// File of display lines, header first. Read from stdin when omitted.
    path: Option<PathBuf>,

    /// Config file (default: <config dir>/table_pager/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let file_config = config::load_config(args.config.as_deref())?;
    let cli = CliOverrides {
        log_file: args.log_file,
        no_color: args.no_color,
    };
    let config = config::resolve(&file_config, &cli, config::no_color_from_env());
    init_logging(&config);
    log::info!("tpg starting");

    let lines = lines::load_lines(args.path.as_deref())?;
    if lines.is_empty() {
        log::warn!("No display lines; only the frame will be shown");
    }

    // Keys come from the controlling terminal so that stdin can carry data.
    let tty = OpenOptions::new()
        .read(true)
        .write(true)
        .open("/dev/tty")
        .map_err(AppError::Input)?;
    let size = detect_size(tty.as_raw_fd(), config.fallback_size);

    // Infrastructure concrete adapters
    let mode = mode_adapter_factory::create_raw_mode_adapter();
    let surface = Surface::open(io::stdout(), tty, mode, size, &config)?;

    // Usecase (depends on port traits via generics)
    let usecase = PagerUsecase::new(surface, lines).with_theme(config.theme);

    // Controller
    let controller = PagerController::new(usecase);

    app_runner::run(controller)?;

    log::info!("tpg finished");
    Ok(())
}

/// Stdout is the drawing surface, so logs only go to a file, and only when
/// one is configured.
fn init_logging(config: &ResolvedConfig) {
    let Some(path) = &config.log_file else {
        return;
    };
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(path) {
        Ok(file) => {
            let _ = WriteLogger::init(config.log_level, log_config, file);
        }
        Err(e) => eprintln!("tpg: cannot create log file {}: {e}", path.display()),
    }
}
