//! # Observability
//!
//! Structured logging for synthesis and table generation via `tracing`.
//!
//! The engines log through the `tracing` macros; this module owns the
//! subscriber setup so binaries and tests can opt into the format and
//! verbosity they want.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tanksmith::observe::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default());
//!
//! tracing::info!(band = "40m", "tuning table built");
//! ```

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
