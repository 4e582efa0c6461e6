//! Admin screens for sections and lessons.

pub mod access;
pub mod admin;
pub mod error;
pub mod lesson;
pub mod resource;

pub use access::{Access, AccessGate};
pub use admin::{AdminScreen, Completion, EditSlot, Pending, RowState};
pub use error::{Control, Notice, ScreenError};
pub use lesson::LessonScreen;
pub use resource::{AdminResource, ValidationError};

use crate::model::Section;

pub type SectionScreen = AdminScreen<Section>;
