//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via the tracing crate
//! - JSON output for production, pretty output for development
//! - `RUST_LOG` overrides the configured level when set

pub mod logging;
