//! # Logging and Tracing Infrastructure
//!
//! Structured logs go to `logs/concall-frontend.log.<date>` (daily rotation),
//! optionally mirrored to stderr.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use frontend::debug::{self, DebugConfig};
//!
//! let _guard = debug::init_logger(&DebugConfig::from_env()).expect("logging");
//!
//! tracing::info!(endpoint = "list_concalls", duration_ms = 234, "API call completed");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `frontend=debug,info`)
//! - `CONCALL_LOG_DIR`: Log directory (default: `logs`)
//! - `CONCALL_LOG_STDERR`: Mirror logs to stderr (1=on)
//! - `CONCALL_LOG_JSON`: JSON log lines (1=on)

pub mod config;
pub mod logger;

pub use config::DebugConfig;
pub use logger::{init as init_logger, LogGuard};
