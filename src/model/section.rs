use crate::model::SectionId;
use serde::{Deserialize, Serialize};

/// A course section, the parent of zero or more lessons.
///
/// Implements [`TableRow`](crate::framework::TableRow) and
/// [`AdminResource`](crate::screen::AdminResource) in [`crate::section_table`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub description: Option<String>,
    pub order_index: i32,
    /// Durable URL of the section image, set only after an upload completed.
    pub image_url: Option<String>,
}

/// Payload for inserting a section; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionInsert {
    pub title: String,
    pub description: Option<String>,
    pub order_index: i32,
    pub image_url: Option<String>,
}

/// Form state of the create and edit controls, as typed by the admin.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDraft {
    pub title: String,
    pub description: String,
    pub order_index: String,
    pub image_url: Option<String>,
}

impl Default for SectionDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            order_index: "0".to_string(),
            image_url: None,
        }
    }
}

impl SectionDraft {
    pub fn new(title: impl Into<String>, order_index: i32) -> Self {
        Self {
            title: title.into(),
            order_index: order_index.to_string(),
            ..Self::default()
        }
    }
}
