//! folio: a portfolio site server with a resilient startup sequence.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                   FOLIO                      │
//!                    │                                              │
//!   Client Request   │  ┌─────────┐   ┌─────────┐   ┌────────────┐ │
//!   ─────────────────┼─▶│   net   │──▶│  http   │──▶│ static SPA │ │
//!                    │  │sequencer│   │ server  │   │ catch-all  │ │
//!                    │  └─────────┘   └────┬────┘   └────────────┘ │
//!                    │                     │                       │
//!                    │                     ▼                       │
//!                    │              ┌────────────┐                 │
//!                    │              │  content   │  /api/profile   │
//!                    │              │   model    │                 │
//!                    │              └────────────┘                 │
//!                    │                                             │
//!                    │  ┌───────────────────────────────────────┐  │
//!                    │  │         Cross-Cutting Concerns        │  │
//!                    │  │  ┌────────┐ ┌───────────┐ ┌─────────┐ │  │
//!                    │  │  │ config │ │ lifecycle │ │ logging │ │  │
//!                    │  │  └────────┘ └───────────┘ └─────────┘ │  │
//!                    │  └───────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! The one piece with real failure handling is the port sequencer in
//! [`net::listener`]: it walks ports upward when the requested one is
//! taken and falls back to a plain bind when the reuse socket option is
//! unsupported, giving up after a configurable attempt budget.

// Core subsystems
pub mod config;
pub mod content;
pub mod http;
pub mod net;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, Startup};
pub use net::{BindError, BoundListener, PortSequencer};
