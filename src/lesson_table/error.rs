//! Error types for the lessons table.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LessonError {
    #[error("Lesson title must not be empty")]
    EmptyTitle,

    /// The referenced section does not exist.
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// The sections table could not be asked.
    #[error("Section lookup failed: {0}")]
    SectionLookup(String),
}
