//! Security subsystem.
//!
//! # Components
//! - `cors.rs`: origin allow-list for browser clients
//!
//! Request body limits are applied in `http::server` from `limits.max_body_size`.

pub mod cors;

pub use cors::cors_layer;
