//! HTTP middleware.
//!
//! Background task execution lives in `crate::tasks`, CORS in
//! `crate::security::cors`.

pub mod process_time;

pub use process_time::{process_time, X_PROCESS_TIME};
