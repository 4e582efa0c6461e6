//! Error types for the sections table.

use thiserror::Error;

/// Reasons the sections table refuses a write.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SectionError {
    /// Titles are required by the table as well as by the form.
    #[error("Section title must not be empty")]
    EmptyTitle,
}
