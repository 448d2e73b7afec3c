//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig (host, port, attempt budget)
//!     → listener.rs (port sequencer: bind, fall back, increment)
//!     → BoundListener (socket + the port that actually stuck)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Bind attempts are strictly sequential, never concurrent
//! - Reuse-option fallback happens at most once per port and does not
//!   consume a port increment
//! - Exhausting the attempt budget is fatal; the caller exits non-zero

pub mod listener;

pub use listener::{Bind, BindError, BoundListener, PortSequencer, TcpBinder};
