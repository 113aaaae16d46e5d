//! File-based logging initialization

use super::config::DebugConfig;
use crate::core::error::{FrontendError, Result};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Keeps the non-blocking log writer flushing. Hold it until exit.
#[must_use = "logs stop being written once the guard is dropped"]
pub struct LogGuard {
    _file: WorkerGuard,
}

/// Initialize the logging system
///
/// Sets up:
/// - a daily-rotated log file under `config.log_dir` (non-blocking writes)
/// - an optional stderr mirror
/// - a panic hook that records panics in the log
pub fn init(config: &DebugConfig) -> Result<LogGuard> {
    fs::create_dir_all(&config.log_dir).map_err(|e| {
        FrontendError::Config(format!(
            "failed to create log directory {}: {e}",
            config.log_dir.display()
        ))
    })?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, &config.log_file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("frontend=info,warn"));

    let file_layer = if config.json {
        fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .boxed()
    };

    let stderr_layer = config
        .log_to_stderr
        .then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| FrontendError::Config(format!("logging already initialized: {e}")))?;

    tracing::info!(
        log_dir = %config.log_dir.display(),
        log_level = %config.log_level,
        debug = config.is_debug_enabled(),
        json = config.json,
        stderr = config.log_to_stderr,
        "Logging initialized"
    );

    setup_panic_hook();

    Ok(LogGuard { _file: guard })
}

/// Log panics with location before handing over to the default hook
fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic message".to_string()
        };

        let backtrace = std::backtrace::Backtrace::force_capture();
        tracing::error!(
            location = %location,
            message = %message,
            "Application panic"
        );
        tracing::error!(backtrace = %backtrace, "Panic backtrace");

        default_panic(panic_info);
    }));
}
