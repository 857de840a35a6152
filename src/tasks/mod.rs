//! Background tasks.
//!
//! # Data Flow
//! ```text
//! background_tasks middleware
//!     → inserts an empty TaskQueue into request extensions
//!     → handler pushes futures through the BackgroundTasks extractor
//!     → response is built and returned
//!     → queued futures run on a spawned task, one after another
//! ```
//!
//! # Design Decisions
//! - Fire-and-forget: failures are logged and counted, never reported to the
//!   client, never retried
//! - Tasks queued by one request run in enqueue order; no ordering across
//!   requests

pub mod notification;

pub use notification::write_notification;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::http::error::ApiError;
use crate::observability::metrics;

/// Errors a background task can fail with.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type QueuedTask = (&'static str, BoxFuture<'static, Result<(), TaskError>>);

/// Per-request queue of pending tasks.
#[derive(Clone, Default)]
pub struct TaskQueue {
    tasks: Arc<Mutex<Vec<QueuedTask>>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<QueuedTask>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, task: QueuedTask) {
        self.lock().push(task);
    }

    fn drain(&self) -> Vec<QueuedTask> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spawn the queued tasks. Returns `None` when nothing was queued.
    pub fn spawn(&self) -> Option<tokio::task::JoinHandle<()>> {
        let tasks = self.drain();
        if tasks.is_empty() {
            return None;
        }
        Some(tokio::spawn(run_tasks(tasks)))
    }
}

async fn run_tasks(tasks: Vec<QueuedTask>) {
    for (name, task) in tasks {
        match task.await {
            Ok(()) => {
                tracing::debug!(task = name, "Background task finished");
                metrics::record_background_task("ok");
            }
            Err(e) => {
                tracing::warn!(task = name, error = %e, "Background task failed");
                metrics::record_background_task("failed");
            }
        }
    }
}

/// Extractor for queuing work to run after the response.
#[derive(Clone)]
pub struct BackgroundTasks {
    queue: TaskQueue,
}

impl BackgroundTasks {
    pub fn new(queue: TaskQueue) -> Self {
        Self { queue }
    }

    pub fn add_task<F>(&self, name: &'static str, task: F)
    where
        F: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        tracing::debug!(task = name, "Background task queued");
        self.queue.push((name, Box::pin(task)));
    }
}

impl<S> FromRequestParts<S> for BackgroundTasks
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TaskQueue>()
            .cloned()
            .map(BackgroundTasks::new)
            .ok_or_else(|| ApiError::Internal("background task queue missing".to_string()))
    }
}

/// Middleware running queued background tasks once the response exists.
pub async fn background_tasks(mut request: Request, next: Next) -> Response {
    let queue = TaskQueue::new();
    request.extensions_mut().insert(queue.clone());
    let response = next.run(request).await;
    queue.spawn();
    response
}
