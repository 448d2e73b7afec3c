//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (already bound by net::listener)
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → request.rs (attach request ID)
//!     → /api/profile (content model as JSON)
//!     → static_files.rs (assets, SPA catch-all to index.html)
//!     → response.rs (JSON error bodies)
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod static_files;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
