//! # Configuration
//!
//! Override hierarchy: defaults → config file → environment → CLI flags.
//!
//! The config file is JSON and lives at `<config dir>/table_pager/config.json`
//! unless `--config` points elsewhere. Every field is optional; whatever is
//! missing falls back to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{LevelFilter, debug};
use serde::{Deserialize, Serialize};

use crate::domain::primitive::{Color, TerminalSize, Theme};
use crate::shared::error::AppError;

// ============================================================================
// Config structs (sparse, all fields Option<T>)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PagerConfig {
    #[serde(default)]
    pub terminal: TerminalConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TerminalConfig {
    pub fallback_rows: Option<u16>,
    pub fallback_cols: Option<u16>,
    pub color: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InputConfig {
    pub escape_timeout_ms: Option<u64>,
    pub cursor_report_timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub level: Option<String>,
}

/// Color names as in `Color`: `"black"` … `"white"`, or `"default"`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    pub frame: Option<Color>,
    pub header_fg: Option<Color>,
    pub band_bg: Option<Color>,
    pub data_fg: Option<Color>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ESCAPE_TIMEOUT_MS: u64 = 10;
pub const DEFAULT_CURSOR_REPORT_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved config (concrete values)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub fallback_size: TerminalSize,
    pub color: bool,
    pub escape_timeout: Duration,
    pub cursor_report_timeout: Duration,
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub theme: Theme,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&PagerConfig::default(), &CliOverrides::default(), false)
    }
}

/// Settings that can be given on the command line; they win over everything.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub log_file: Option<PathBuf>,
    pub no_color: bool,
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the default config location, if the platform has a config dir.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("table_pager").join("config.json"))
}

/// Load the config file.
///
/// An explicit `path` must exist. The default location is optional: when it
/// is missing the empty config is returned.
pub fn load_config(path: Option<&Path>) -> Result<PagerConfig, AppError> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match config_path() {
            Some(p) => (p, false),
            None => return Ok(PagerConfig::default()),
        },
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No config at {}, using defaults", path.display());
            return Ok(PagerConfig::default());
        }
        Err(source) => return Err(AppError::ConfigIo { path, source }),
    };

    let config = parse_config(&text).map_err(|source| AppError::ConfigParse {
        path: path.clone(),
        source,
    })?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn parse_config(text: &str) -> Result<PagerConfig, serde_json::Error> {
    serde_json::from_str(text)
}

/// Merge the layers into concrete values.
///
/// `no_color_env` is whether `NO_COLOR` is set to a non-empty value.
pub fn resolve(config: &PagerConfig, cli: &CliOverrides, no_color_env: bool) -> ResolvedConfig {
    let fallback_size = TerminalSize::new(
        config
            .terminal
            .fallback_rows
            .filter(|&r| r > 0)
            .unwrap_or(TerminalSize::FALLBACK.rows),
        config
            .terminal
            .fallback_cols
            .filter(|&c| c > 0)
            .unwrap_or(TerminalSize::FALLBACK.cols),
    );

    let color = config.terminal.color.unwrap_or(true) && !no_color_env && !cli.no_color;

    let log_level = config
        .log
        .level
        .as_deref()
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let mut theme = Theme::DEFAULT;
    let colors = &config.theme;
    theme.chrome.fg = colors.frame.unwrap_or(theme.chrome.fg);
    theme.header.fg = colors.header_fg.unwrap_or(theme.header.fg);
    // Header and data rows share one background band.
    if let Some(band) = colors.band_bg {
        theme.header.bg = band;
        theme.data.bg = band;
    }
    theme.data.fg = colors.data_fg.unwrap_or(theme.data.fg);

    ResolvedConfig {
        fallback_size,
        color,
        escape_timeout: Duration::from_millis(
            config
                .input
                .escape_timeout_ms
                .unwrap_or(DEFAULT_ESCAPE_TIMEOUT_MS),
        ),
        cursor_report_timeout: Duration::from_millis(
            config
                .input
                .cursor_report_timeout_ms
                .unwrap_or(DEFAULT_CURSOR_REPORT_TIMEOUT_MS),
        ),
        log_file: cli.log_file.clone().or_else(|| config.log.file.clone()),
        log_level,
        theme,
    }
}

/// `NO_COLOR` convention: present and non-empty disables color.
pub fn no_color_from_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&PagerConfig::default(), &CliOverrides::default(), false);
        assert_eq!(resolved.fallback_size, TerminalSize::new(24, 80));
        assert!(resolved.color);
        assert_eq!(resolved.escape_timeout, Duration::from_millis(10));
        assert_eq!(resolved.cursor_report_timeout, Duration::from_secs(1));
        assert!(resolved.log_file.is_none());
        assert_eq!(resolved.log_level, LevelFilter::Info);
        assert_eq!(resolved.theme, Theme::DEFAULT);
    }

    #[test]
    fn test_json_values_override_defaults() {
        let json = r#"{
            "terminal": { "fallback_rows": 40, "fallback_cols": 120, "color": true },
            "input": { "escape_timeout_ms": 25, "cursor_report_timeout_ms": 250 },
            "log": { "file": "/tmp/tpg.log", "level": "debug" }
        }"#;
        let config = parse_config(json).unwrap();
        let resolved = resolve(&config, &CliOverrides::default(), false);
        assert_eq!(resolved.fallback_size, TerminalSize::new(40, 120));
        assert_eq!(resolved.escape_timeout, Duration::from_millis(25));
        assert_eq!(resolved.cursor_report_timeout, Duration::from_millis(250));
        assert_eq!(resolved.log_file, Some(PathBuf::from("/tmp/tpg.log")));
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = parse_config(r#"{ "input": { "escape_timeout_ms": 50 } }"#).unwrap();
        let resolved = resolve(&config, &CliOverrides::default(), false);
        assert_eq!(resolved.escape_timeout, Duration::from_millis(50));
        assert_eq!(resolved.fallback_size, TerminalSize::FALLBACK);
    }

    #[test]
    fn test_zero_fallback_size_is_ignored() {
        let config = parse_config(r#"{ "terminal": { "fallback_rows": 0 } }"#).unwrap();
        let resolved = resolve(&config, &CliOverrides::default(), false);
        assert_eq!(resolved.fallback_size.rows, 24);
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = parse_config(r#"{ "log": { "level": "chatty" } }"#).unwrap();
        let resolved = resolve(&config, &CliOverrides::default(), false);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_no_color_env_disables_color() {
        let resolved = resolve(&PagerConfig::default(), &CliOverrides::default(), true);
        assert!(!resolved.color);
    }

    #[test]
    fn test_cli_wins_over_file() {
        let config = parse_config(r#"{ "log": { "file": "from-file.log" } }"#).unwrap();
        let cli = CliOverrides {
            log_file: Some(PathBuf::from("from-cli.log")),
            no_color: true,
        };
        let resolved = resolve(&config, &cli, false);
        assert_eq!(resolved.log_file, Some(PathBuf::from("from-cli.log")));
        assert!(!resolved.color);
    }

    #[test]
    fn test_theme_colors_override_defaults() {
        let json = r#"{ "theme": { "frame": "red", "band_bg": "black", "data_fg": "white" } }"#;
        let resolved = resolve(&parse_config(json).unwrap(), &CliOverrides::default(), false);
        assert_eq!(resolved.theme.chrome.fg, Color::Red);
        assert_eq!(resolved.theme.header.bg, Color::Black);
        assert_eq!(resolved.theme.data.bg, Color::Black);
        assert_eq!(resolved.theme.data.fg, Color::White);
        assert_eq!(resolved.theme.header.fg, Theme::DEFAULT.header.fg);
    }

    #[test]
    fn test_unknown_color_name_is_an_error() {
        assert!(parse_config(r#"{ "theme": { "frame": "orange" } }"#).is_err());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_config("{ terminal: ").is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/table_pager.json")));
        assert!(matches!(result, Err(AppError::ConfigIo { .. })));
    }
}
