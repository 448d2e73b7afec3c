//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Configure router once → Bind via port sequencer → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal or trigger → Stop accepting → Drain → Exit 0
//! ```
//!
//! # Design Decisions
//! - Initialization state is an explicit enum, checked once by the
//!   orchestrator; configuring twice is an error, not a silent no-op probe
//! - Fail fast: any startup error is fatal and exits non-zero
//! - Listeners bind last, so traffic only arrives when everything is ready

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{AppPhase, Startup, StartupError};
