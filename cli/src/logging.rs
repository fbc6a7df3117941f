use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{runtime_dir, LogLevel};

const LOG_PREFIX: &str = "pwrwatch";

static INIT: OnceLock<()> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Daily-rotated file in the runtime directory. Used while the TUI owns
    /// the terminal.
    File,
    Stderr,
}

pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

pub fn init(level: LogLevel, mode: LogMode) -> LogGuard {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let mut guard = None;

    INIT.get_or_init(|| {
        let Some(directives) = filter_directives(level, rust_log.as_deref()) else {
            return;
        };
        let filter = EnvFilter::new(directives);

        guard = match mode {
            LogMode::File => init_file_logging(filter),
            LogMode::Stderr => {
                init_stderr_logging(filter);
                None
            }
        };
    });

    LogGuard { _guard: guard }
}

/// Filter directives for the subscriber, or `None` when logging stays off.
/// A non-empty `RUST_LOG` takes precedence over the configured level.
fn filter_directives(level: LogLevel, rust_log: Option<&str>) -> Option<String> {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(env) => Some(env.to_string()),
        None => level
            .as_tracing_level()
            .map(|l| l.as_str().to_ascii_lowercase()),
    }
}

fn init_file_logging(filter: EnvFilter) -> Option<WorkerGuard> {
    let log_dir = runtime_dir();

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!(
            "Warning: Failed to create log directory {:?}: {}",
            log_dir, e
        );
        return None;
    }

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .max_log_files(7)
        .build(&log_dir)
        .ok()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Some(guard)
}

fn init_stderr_logging(filter: EnvFilter) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(true)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}

/// Directory holding the rotated TUI log files.
pub fn log_dir() -> PathBuf {
    runtime_dir()
}
