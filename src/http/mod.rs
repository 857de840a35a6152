//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → extract.rs (typed, validated parameters)
//!     → handlers in api/ and users/
//!     → error.rs (ApiError → status + JSON detail)
//! ```

pub mod error;
pub mod extract;
pub mod middleware;
pub mod request;
pub mod server;
pub mod validation;

pub use error::ApiError;
pub use extract::{QueryModel, ValidJson, ValidPath, ValidQuery};
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
pub use validation::{FieldError, Validate};
