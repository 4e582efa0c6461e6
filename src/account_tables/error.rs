use thiserror::Error;

/// Reasons an account table refuses a write.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    /// Rows keyed by a user id are written with `upsert` only.
    #[error("{0} rows are keyed by user id and cannot be inserted")]
    KeyedByUser(&'static str),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}
