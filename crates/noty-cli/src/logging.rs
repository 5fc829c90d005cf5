//! Logging setup with file output and optional stderr.
//!
//! Logs always go to a daily-rolling file. Stderr logging is enabled when
//! `NOTY_LOG` or `RUST_LOG` is set, or in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`NOTY_LOG`** (highest priority) - Noty-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for noty crates
//!
//! ## Log File Location
//!
//! Default: `<data dir>/logs/noty.log.YYYY-MM-DD`. Override with `--log-file <path>`.

use std::{env, path::Path, path::PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

const NOTY_CRATES: &[&str] = &[
    "noty",
    "noty_core",
    "noty_infrastructure",
    "noty_application",
    "noty_cli",
];

type InitError = Box<dyn std::error::Error + Send + Sync>;

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

pub struct LogConfig {
    /// Directory of the rolling log, or a file path whose name is used as prefix.
    pub log_path: PathBuf,
}

/// Initialize logging.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program.
/// Dropping it flushes and stops the background file writer.
pub fn init(config: LogConfig) -> Result<LogGuard, InitError> {
    let (log_dir, filename) = split_log_path(config.log_path);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_filter());

    let stderr_enabled =
        env::var("NOTY_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions);

    let stderr_layer = if stderr_enabled {
        Some(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(create_filter()),
        )
    } else {
        None
    };

    Registry::default()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests: stdout only, tolerating repeated calls.
#[cfg(test)]
pub fn test() {
    let _ = fmt().with_env_filter(create_filter()).with_test_writer().try_init();
}

/// Splits `path` into a directory and file name; a path without an extension
/// is taken as the directory.
fn split_log_path(path: PathBuf) -> (PathBuf, String) {
    const DEFAULT_NAME: &str = "noty.log";

    if path.extension().is_none() {
        return (path, DEFAULT_NAME.to_string());
    }

    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    (dir, name)
}

/// [`EnvFilter`] following the `NOTY_LOG` > `RUST_LOG` > default priority.
fn create_filter() -> EnvFilter {
    if let Ok(noty_log) = env::var("NOTY_LOG") {
        return expand_noty_log(&noty_log);
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    EnvFilter::new(directives("info"))
}

/// Expands a bare level such as `NOTY_LOG=debug` to every noty crate.
///
/// Values with module syntax (`=`, `:` or `,`) are used as-is.
fn expand_noty_log(noty_log: &str) -> EnvFilter {
    if noty_log.contains('=') || noty_log.contains(':') || noty_log.contains(',') {
        return EnvFilter::new(noty_log);
    }
    EnvFilter::new(directives(noty_log))
}

fn directives(level: &str) -> String {
    let mut directives = String::from("warn");
    for krate in NOTY_CRATES {
        directives.push_str(&format!(",{}={}", krate, level));
    }
    directives
}
