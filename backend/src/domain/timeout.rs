//! Bounded waits around collaborator calls.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::error;

use super::Error;

/// Failure of a bounded collaborator call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError<E> {
    #[error("{0}")]
    Failed(E),
    #[error("timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),
}

impl<E: fmt::Display> CallError<E> {
    /// Log the failure and convert it to a redacted internal error.
    pub fn into_domain(self, operation: &'static str) -> Error {
        error!(operation, error = %self, "collaborator call failed");
        Error::internal(format!("{operation}: {self}"))
    }
}

/// Upper bound applied to every datastore, log and mail call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollaboratorTimeout(Duration);

impl CollaboratorTimeout {
    pub const DEFAULT: Duration = Duration::from_millis(5_000);

    pub fn new(limit: Duration) -> Self {
        Self(limit)
    }

    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn limit(&self) -> Duration {
        self.0
    }

    /// Await `call`, giving up once the limit elapses.
    pub async fn run<F, T, E>(&self, call: F) -> Result<T, CallError<E>>
    where
        F: Future<Output = Result<T, E>>,
    {
        match tokio::time::timeout(self.0, call).await {
            Ok(result) => result.map_err(CallError::Failed),
            Err(_) => Err(CallError::TimedOut(self.0)),
        }
    }

    /// [`Self::run`] followed by [`CallError::into_domain`].
    pub async fn call<F, T, E>(&self, operation: &'static str, call: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        self.run(call)
            .await
            .map_err(|failure| failure.into_domain(operation))
    }
}

impl Default for CollaboratorTimeout {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
