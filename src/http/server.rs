//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with all handlers
//! - Wire up middleware (trace, timeout, body limit, session cookie)
//! - Spawn the session eviction sweeper
//! - Bind the server to a listener with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GateConfig;
use crate::http::{handlers, session};
use crate::pipeline::{GatePipeline, SharedPipeline};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: SharedPipeline,
    pub cookie_name: String,
}

/// HTTP server for the admission gate.
pub struct GateServer {
    router: Router,
    pipeline: SharedPipeline,
    config: GateConfig,
}

impl GateServer {
    /// Create a new server with the given configuration.
    pub fn new(config: GateConfig) -> Self {
        let pipeline = Arc::new(GatePipeline::new(&config));
        let state = AppState {
            pipeline: pipeline.clone(),
            cookie_name: config.session.cookie_name.clone(),
        };
        let router = build_router(&config, state);
        Self {
            router,
            pipeline,
            config,
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Admission gate starting");

        // Evict idle sessions in the background for the life of the
        // process.
        let store = self.pipeline.store().clone();
        let sweep_interval = Duration::from_secs(self.config.session.sweep_interval_secs);
        tokio::spawn(async move {
            store.run_sweeper(sweep_interval).await;
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Admission gate stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}

/// Build the axum router with all middleware layers. Exposed for
/// integration tests that drive the router directly.
pub fn build_router(config: &GateConfig, state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health))
        .route("/api/status", get(handlers::status))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/submit", post(handlers::submit))
        .route("/api/admit", post(handlers::admit))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::attach_session,
        ))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.listener.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
