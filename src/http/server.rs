//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router (profile API + static assets)
//! - Wire up middleware (tracing, timeout, request ID, request log)
//! - Serve on a listener the port sequencer already bound
//! - Shut down gracefully on ctrl-c or a programmatic trigger

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{any, get},
    Json, Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::content::Profile;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::http::response::error_response;
use crate::http::static_files;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub profile: Arc<Profile>,
}

/// HTTP server for the portfolio site.
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and content.
    pub fn new(config: &ServerConfig, profile: Profile) -> Self {
        let state = AppState {
            profile: Arc::new(profile),
        };
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        // Unmatched /api paths must 404 as JSON instead of falling through
        // to the SPA catch-all.
        Router::new()
            .route("/api/profile", get(profile_handler))
            .route("/api/{*rest}", any(api_not_found))
            .fallback_service(static_files::spa_service(&config.static_files))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(middleware::from_fn(request_log))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Serve the content model as JSON.
async fn profile_handler(State(state): State<AppState>) -> Json<Profile> {
    Json(state.profile.as_ref().clone())
}

async fn api_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "no such endpoint")
}

/// Log API requests (method, path, status, duration) and copy the request
/// ID onto every response.
async fn request_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request.headers().get(X_REQUEST_ID).cloned();
    let start = Instant::now();

    let mut response = next.run(request).await;

    if let Some(id) = request_id {
        response.headers_mut().insert(X_REQUEST_ID, id);
    }

    if path.starts_with("/api") {
        tracing::info!(
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "api request"
        );
    }

    response
}

/// Resolve when either ctrl-c arrives or the coordinator triggers.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if result.is_ok() {
                tracing::info!("shutdown signal received");
            }
        }
        _ = shutdown.recv() => {
            tracing::info!("programmatic shutdown requested");
        }
    }
}
