//! [`TableRow`] and [`AdminResource`] implementations for [`Section`].

use super::error::SectionError;
use crate::framework::TableRow;
use crate::model::{Section, SectionDraft, SectionId, SectionInsert};
use crate::screen::resource::{
    optional_text, parse_order_index, required_title, AdminResource, ValidationError,
};
use async_trait::async_trait;

#[async_trait]
impl TableRow for Section {
    const TABLE: &'static str = "sections";
    const ID_PREFIX: &'static str = "s";
    type Id = SectionId;
    type Insert = SectionInsert;
    type Filter = ();
    type Context = ();
    type Error = SectionError;

    fn id(&self) -> &SectionId {
        &self.id
    }

    fn order_index(&self) -> i32 {
        self.order_index
    }

    fn from_insert(id: SectionId, params: SectionInsert) -> Result<Self, SectionError> {
        if params.title.trim().is_empty() {
            return Err(SectionError::EmptyTitle);
        }
        Ok(Self {
            id,
            title: params.title,
            description: params.description,
            order_index: params.order_index,
            image_url: params.image_url,
        })
    }

    async fn on_update(&self, next: &Section, _ctx: &()) -> Result<(), SectionError> {
        if next.title.trim().is_empty() {
            return Err(SectionError::EmptyTitle);
        }
        Ok(())
    }
}

impl AdminResource for Section {
    type Draft = SectionDraft;
    const ACCEPTS_ASSETS: bool = true;

    fn validate_draft(draft: &SectionDraft) -> Result<SectionInsert, ValidationError> {
        Ok(SectionInsert {
            title: required_title(&draft.title)?,
            description: optional_text(&draft.description),
            order_index: parse_order_index(&draft.order_index)?,
            image_url: draft.image_url.clone(),
        })
    }

    fn draft_from_row(row: &Section) -> SectionDraft {
        SectionDraft {
            title: row.title.clone(),
            description: row.description.clone().unwrap_or_default(),
            order_index: row.order_index.to_string(),
            image_url: row.image_url.clone(),
        }
    }

    fn apply_draft(row: &Section, draft: &SectionDraft) -> Result<Section, ValidationError> {
        Ok(Section {
            id: row.id.clone(),
            title: required_title(&draft.title)?,
            description: optional_text(&draft.description),
            order_index: parse_order_index(&draft.order_index)?,
            image_url: draft.image_url.clone(),
        })
    }

    fn attach_to_insert(params: &mut SectionInsert, url: String) {
        params.image_url = Some(url);
    }

    fn attach_to_row(&mut self, url: String) {
        self.image_url = Some(url);
    }
}
