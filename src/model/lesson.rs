use crate::model::{LessonId, SectionId};
use serde::{Deserialize, Serialize};

/// A lesson, always attached to exactly one [`Section`](crate::model::Section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub order_index: i32,
    pub section_id: SectionId,
}

/// Payload for inserting a lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonInsert {
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub order_index: i32,
    pub section_id: SectionId,
}

/// Equality filters accepted by the lessons table.
#[derive(Debug, Clone, PartialEq)]
pub enum LessonFilter {
    Section(SectionId),
}

/// Form state of the lesson controls. `section_id` is `None` until a section is picked.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonDraft {
    pub title: String,
    pub content: String,
    pub video_url: String,
    pub order_index: String,
    pub section_id: Option<SectionId>,
}

impl Default for LessonDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            video_url: String::new(),
            order_index: "0".to_string(),
            section_id: None,
        }
    }
}
