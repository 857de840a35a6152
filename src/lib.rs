//! Items API Library
//!
//! Typed request handling over an in-memory item list: validated path, query
//! and body parameters, dependency injection with scoped resources, CORS and
//! timing middleware, and fire-and-forget background tasks.

// Core subsystems
pub mod api;
pub mod config;
pub mod http;
pub mod users;

// Domain
pub mod dependencies;
pub mod models;
pub mod store;
pub mod tasks;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
