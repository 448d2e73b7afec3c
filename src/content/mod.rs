//! Site content subsystem.
//!
//! # Data Flow
//! ```text
//! profile file (TOML, optional)
//!     → model.rs (deserialize into Profile)
//!     → shared via Arc with the HTTP layer
//!     → served as JSON at /api/profile
//! ```
//!
//! # Design Decisions
//! - One content model, one render path: the page is data, not code, so
//!   redesigns edit a TOML file instead of forking the whole page
//! - A built-in placeholder profile keeps the server usable out of the box
//! - Rendering stays client-side; the server only ships data and assets

pub mod model;

pub use model::{BlogPost, Links, Profile, ProfileError, Project, Skill};
