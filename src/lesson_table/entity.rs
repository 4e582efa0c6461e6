//! [`TableRow`] and [`AdminResource`] implementations for [`Lesson`].

use super::error::LessonError;
use crate::framework::{TableClient, TableRow};
use crate::model::{Lesson, LessonDraft, LessonFilter, LessonId, LessonInsert, Section, SectionId};
use crate::screen::resource::{
    optional_text, parse_order_index, required_title, AdminResource, ValidationError,
};
use async_trait::async_trait;

async fn ensure_section(
    sections: &TableClient<Section>,
    id: &SectionId,
) -> Result<(), LessonError> {
    match sections.get(id.clone()).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(LessonError::UnknownSection(id.to_string())),
        Err(e) => Err(LessonError::SectionLookup(e.to_string())),
    }
}

#[async_trait]
impl TableRow for Lesson {
    const TABLE: &'static str = "lessons";
    const ID_PREFIX: &'static str = "l";
    type Id = LessonId;
    type Insert = LessonInsert;
    type Filter = LessonFilter;
    type Context = TableClient<Section>;
    type Error = LessonError;

    fn id(&self) -> &LessonId {
        &self.id
    }

    fn order_index(&self) -> i32 {
        self.order_index
    }

    fn matches(&self, filter: &LessonFilter) -> bool {
        match filter {
            LessonFilter::Section(section_id) => &self.section_id == section_id,
        }
    }

    fn from_insert(id: LessonId, params: LessonInsert) -> Result<Self, LessonError> {
        if params.title.trim().is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        Ok(Self {
            id,
            title: params.title,
            content: params.content,
            video_url: params.video_url,
            order_index: params.order_index,
            section_id: params.section_id,
        })
    }

    async fn on_insert(&self, sections: &TableClient<Section>) -> Result<(), LessonError> {
        ensure_section(sections, &self.section_id).await
    }

    async fn on_update(
        &self,
        next: &Lesson,
        sections: &TableClient<Section>,
    ) -> Result<(), LessonError> {
        if next.title.trim().is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        ensure_section(sections, &next.section_id).await
    }
}

impl AdminResource for Lesson {
    type Draft = LessonDraft;

    fn validate_draft(draft: &LessonDraft) -> Result<LessonInsert, ValidationError> {
        let title = required_title(&draft.title)?;
        let section_id = draft
            .section_id
            .clone()
            .ok_or(ValidationError::MissingSection)?;
        Ok(LessonInsert {
            title,
            content: optional_text(&draft.content),
            video_url: optional_text(&draft.video_url),
            order_index: parse_order_index(&draft.order_index)?,
            section_id,
        })
    }

    fn draft_from_row(row: &Lesson) -> LessonDraft {
        LessonDraft {
            title: row.title.clone(),
            content: row.content.clone().unwrap_or_default(),
            video_url: row.video_url.clone().unwrap_or_default(),
            order_index: row.order_index.to_string(),
            section_id: Some(row.section_id.clone()),
        }
    }

    fn apply_draft(row: &Lesson, draft: &LessonDraft) -> Result<Lesson, ValidationError> {
        let params = Self::validate_draft(draft)?;
        Ok(Lesson {
            id: row.id.clone(),
            title: params.title,
            content: params.content,
            video_url: params.video_url,
            order_index: params.order_index,
            section_id: params.section_id,
        })
    }
}
