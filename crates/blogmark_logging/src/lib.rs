#![deny(missing_docs)]
//! Shared logging utilities for the blogmark workspace.
//!
//! This crate provides the `bm_*` logging macros used across the codebase,
//! the logger initialization used by the `blogmark` binary, and a minimal
//! test initializer for the global logger.

use std::fs::File;
use std::path::{Path, PathBuf};

pub use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! bm_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! bm_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! bm_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! bm_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! bm_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the terminal (stderr for warnings and errors).
    Terminal,
    /// Write to the given file, truncating it.
    File(PathBuf),
    /// Write to both the terminal and the given file.
    Both(PathBuf),
}

/// Maps a `-v` count from the command line to a level filter.
///
/// Zero keeps the binary quiet apart from warnings.
pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize the global logger with the specified destination.
///
/// Returns `false` when no logger could be installed, either because a
/// logger is already set or because the log file could not be created.
pub fn initialize(destination: LogDestination, level: LevelFilter) -> bool {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::Terminal => vec![term_logger(level, config)],
        LogDestination::File(path) => match file_logger(&path, level, config) {
            Some(logger) => vec![logger],
            None => return false,
        },
        LogDestination::Both(path) => {
            let mut loggers = vec![term_logger(level, config.clone())];
            if let Some(logger) = file_logger(&path, level, config) {
                loggers.push(logger);
            }
            loggers
        }
    };

    CombinedLogger::init(loggers).is_ok()
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        // html5ever and reqwest internals are noisy at debug level.
        .add_filter_ignore_str("html5ever")
        .add_filter_ignore_str("selectors")
        .add_filter_ignore_str("hyper")
        .build()
}

fn term_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}

fn file_logger(path: &Path, level: LevelFilter, config: Config) -> Option<Box<dyn SharedLogger>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_increasing_levels() {
        assert_eq!(level_from_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_from_verbosity(1), LevelFilter::Info);
        assert_eq!(level_from_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_from_verbosity(9), LevelFilter::Trace);
    }

    #[test]
    fn file_logger_reports_unwritable_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("no_such_dir").join("blogmark.log");
        assert!(file_logger(&missing, LevelFilter::Info, build_config()).is_none());
    }
}
