use crate::framework::RemoteError;
use crate::screen::resource::ValidationError;
use crate::services::StorageError;
use std::fmt::Display;

/// Errors of a single screen action. None of them is fatal to the screen.
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error("Access denied. Admin only.")]
    AccessDenied,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("Upload failed: {0}")]
    Upload(#[from] StorageError),
    #[error("No row is being edited")]
    NotEditing,
    #[error("No row with id {0}")]
    UnknownRow(String),
    #[error("This resource does not accept uploads")]
    AssetsUnsupported,
}

/// The control an error message is shown next to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control<I> {
    List,
    Create,
    Edit(I),
    Delete(I),
}

/// An error surfaced inline on the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice<I> {
    pub control: Control<I>,
    pub message: String,
}

impl<I> Notice<I> {
    pub fn new(control: Control<I>, error: &impl Display) -> Self {
        Self {
            control,
            message: error.to_string(),
        }
    }
}
