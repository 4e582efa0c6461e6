//! # Remote Errors
//!
//! Failures of a single data-service round trip. Every one of them is terminal for the
//! operation that produced it and is never retried.

/// Errors returned by the data service and the other remote collaborators.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Data service closed")]
    StoreClosed,
    #[error("Data service dropped response channel")]
    StoreDropped,
    #[error("Row not found: {0}")]
    NotFound(String),
    #[error("Row rejected: {0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl RemoteError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        RemoteError::Rejected(msg.into().into())
    }
}
