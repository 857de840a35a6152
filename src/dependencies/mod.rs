//! Dependency injection for handlers.
//!
//! # Data Flow
//! ```text
//! request parts
//!     → Depends<T>   (T: Dependency, resolved from the request)
//!     → Scoped<R>    (R: Acquire<S>, released when the handler is done)
//!     → handler arguments
//! ```
//!
//! # Design Decisions
//! - One contract for every provider: `fn resolve(&Parts) -> Result<Self, ApiError>`
//! - Struct providers implement it directly; function providers are adapted
//!   with a newtype (see `common.rs`)
//! - Scoped resources release from `Drop`, so teardown runs exactly once even
//!   when the handler fails

pub mod common;
pub mod scoped;

pub use common::{common_parameters, CommonParameters};
pub use scoped::{Acquire, Release, Scoped, SessionTracker, StoreSession};

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::http::error::ApiError;

/// A value a handler can ask for, derived from the incoming request.
pub trait Dependency: Sized + Send {
    fn resolve(parts: &Parts) -> Result<Self, ApiError>;
}

/// Extractor resolving a [`Dependency`].
#[derive(Debug, Clone)]
pub struct Depends<T>(pub T);

impl<S, T> FromRequestParts<S> for Depends<T>
where
    T: Dependency,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        T::resolve(parts).map(Depends)
    }
}
