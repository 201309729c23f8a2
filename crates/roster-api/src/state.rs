//! Shared router state.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use roster_graph::{EmployeeStore, GraphError};
use tracing::Instrument;

use crate::error::ApiError;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// State handed to every handler: the store handle and the store-call deadline.
///
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EmployeeStore>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self {
            store,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Await a read-only store call, failing with [`ApiError::Timeout`] past
    /// the deadline. The call is dropped at the deadline, so it must not mutate.
    pub async fn bounded<T, F>(&self, call: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, GraphError>>,
    {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(ApiError::Timeout(self.request_timeout)),
        }
    }

    /// Run a mutating store call on its own task, waiting at most the deadline.
    ///
    /// The task is never cancelled: a write always reaches its commit or
    /// rollback even when the client has already been answered. A 504 from a
    /// write therefore means the outcome is unknown, not that nothing changed.
    pub async fn bounded_write<T, F, Fut>(&self, call: F) -> Result<T, ApiError>
    where
        F: FnOnce(Arc<dyn EmployeeStore>) -> Fut,
        Fut: Future<Output = Result<T, GraphError>> + Send + 'static,
        T: Send + 'static,
    {
        let task = tokio::spawn(call(self.store.clone()).in_current_span());
        match tokio::time::timeout(self.request_timeout, task).await {
            Ok(joined) => Ok(joined??),
            Err(_) => {
                tracing::warn!("Write still running after the deadline; left to finish");
                Err(ApiError::Timeout(self.request_timeout))
            }
        }
    }
}
