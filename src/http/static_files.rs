//! Static asset serving with an SPA catch-all.
//!
//! The client-side page owns its routing, so any path that does not match
//! a file on disk gets the entry document and lets the page resolve it.

use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::StaticFilesConfig;

/// Build the asset service: files from `asset_dir`, falling back to the
/// entry document for unmatched paths.
pub fn spa_service(config: &StaticFilesConfig) -> ServeDir<ServeFile> {
    let index = Path::new(&config.asset_dir).join(&config.index_file);
    ServeDir::new(&config.asset_dir).fallback(ServeFile::new(index))
}
