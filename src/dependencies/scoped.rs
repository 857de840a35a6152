//! Scoped resources: acquired before the handler, released after it.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::store::ItemStore;

/// Teardown half of a scoped resource.
pub trait Release: Send {
    fn release(&mut self);
}

/// Setup half of a scoped resource, resolved against application state `S`.
pub trait Acquire<S>: Release + Sized {
    fn acquire(parts: &Parts, state: &S) -> Result<Self, ApiError>;
}

/// Extractor holding a scoped resource for the duration of the handler.
///
/// `release` runs when the guard drops: after the handler has produced its
/// response value and before the response is written, on success and on
/// error alike.
#[derive(Debug)]
pub struct Scoped<R: Release> {
    resource: R,
}

impl<R: Release> Scoped<R> {
    pub fn new(resource: R) -> Self {
        Self { resource }
    }
}

impl<R: Release> Deref for Scoped<R> {
    type Target = R;
    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl<R: Release> DerefMut for Scoped<R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.resource
    }
}

impl<R: Release> Drop for Scoped<R> {
    fn drop(&mut self) {
        self.resource.release();
    }
}

impl<S, R> FromRequestParts<S> for Scoped<R>
where
    R: Acquire<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        R::acquire(parts, state).map(Scoped::new)
    }
}

/// Counts opened and closed store sessions.
#[derive(Debug, Default)]
pub struct SessionTracker {
    opened: AtomicU64,
    closed: AtomicU64,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new session and return its id.
    fn open(&self) -> u64 {
        self.opened.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn close(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn opened(&self) -> u64 {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> u64 {
        self.closed.load(Ordering::SeqCst)
    }

    /// Sessions currently held by in-flight handlers.
    pub fn active(&self) -> u64 {
        self.opened().saturating_sub(self.closed())
    }
}

/// A handle on the item store scoped to one request.
pub struct StoreSession {
    id: u64,
    store: Arc<dyn ItemStore>,
    tracker: Arc<SessionTracker>,
    released: bool,
}

impl StoreSession {
    pub fn open(store: Arc<dyn ItemStore>, tracker: Arc<SessionTracker>) -> Self {
        let id = tracker.open();
        tracing::debug!(session = id, "Store session opened");
        Self {
            id,
            store,
            tracker,
            released: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Deref for StoreSession {
    type Target = dyn ItemStore;
    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}

impl Release for StoreSession {
    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.tracker.close();
        tracing::debug!(session = self.id, "Store session closed");
    }
}

impl Acquire<AppState> for StoreSession {
    fn acquire(_parts: &Parts, state: &AppState) -> Result<Self, ApiError> {
        Ok(StoreSession::open(state.store.clone(), state.sessions.clone()))
    }
}
