//! Startup orchestration.
//!
//! One orchestrator owns the initialization state for the whole process:
//! the router is configured exactly once, then the listener is acquired
//! through the port sequencer. There is no ad-hoc "already registered"
//! probing; a second `configure` call is a hard error.

use std::path::Path;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::content::{Profile, ProfileError};
use crate::http::HttpServer;
use crate::net::{BindError, BoundListener, PortSequencer, TcpBinder};

/// Initialization state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    Uninitialized,
    Configured,
}

/// Error type for startup orchestration.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("application already configured")]
    AlreadyConfigured,

    #[error("failed to load profile: {0}")]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Bind(#[from] BindError),
}

/// Single owner of the startup sequence.
pub struct Startup {
    phase: AppPhase,
    config: ServerConfig,
}

impl Startup {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            phase: AppPhase::Uninitialized,
            config,
        }
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    /// Load the content model and build the HTTP server.
    ///
    /// Transitions `Uninitialized → Configured`; calling again fails.
    pub fn configure(&mut self) -> Result<HttpServer, StartupError> {
        match self.phase {
            AppPhase::Configured => Err(StartupError::AlreadyConfigured),
            AppPhase::Uninitialized => {
                let profile = match &self.config.content.profile_path {
                    Some(path) => Profile::load(Path::new(path))?,
                    None => Profile::placeholder(),
                };
                let server = HttpServer::new(&self.config, profile);
                self.phase = AppPhase::Configured;
                Ok(server)
            }
        }
    }

    /// Acquire the listener through the port sequencer.
    pub fn bind(&self) -> Result<BoundListener, StartupError> {
        let sequencer = PortSequencer::from_config(&self.config.listener)?;
        Ok(sequencer.bind(&mut TcpBinder::default())?)
    }
}
