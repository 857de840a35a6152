//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (timing, CORS, request ID, tracing, limits, tasks)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::api::{not_found, setup_api_router};
use crate::config::AppConfig;
use crate::dependencies::SessionTracker;
use crate::http::middleware::process_time;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::ShutdownSignal;
use crate::security::cors_layer;
use crate::store::{ItemStore, MemoryItemStore};
use crate::tasks::background_tasks;
use crate::users::setup_users_router;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    pub sessions: Arc<SessionTracker>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            sessions: Arc::new(SessionTracker::new()),
            config: Arc::new(config),
        }
    }
}

/// HTTP server for the items API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server backed by an empty in-memory store.
    pub fn new(config: AppConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryItemStore::new()))
    }

    /// Create a new HTTP server over an existing store.
    pub fn with_store(config: AppConfig, store: Arc<dyn ItemStore>) -> Self {
        let state = AppState::new(config, store);
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers are listed innermost first; `process_time` is outermost so every
    /// response, including CORS preflights and 404s, carries the header.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let config = state.config.clone();

        Router::new()
            .merge(setup_api_router())
            .merge(setup_users_router())
            .fallback(not_found)
            .with_state(state)
            .layer(middleware::from_fn(background_tasks))
            .layer(DefaultBodyLimit::max(config.limits.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(set_request_id_layer())
            .layer(cors_layer(&config.cors))
            .layer(middleware::from_fn(process_time))
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Shared state (store, session tracker, config).
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            title = %self.state.config.app.title,
            version = %self.state.config.app.version,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
