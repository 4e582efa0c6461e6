use crate::framework::{Query, TableClient, TableRow};
use crate::model::{Lesson, Section, SectionId};
use crate::screen::access::{Access, AccessGate};
use crate::screen::admin::AdminScreen;
use crate::screen::error::ScreenError;
use std::ops::{Deref, DerefMut};
use tracing::{instrument, warn};

/// The lessons screen: an [`AdminScreen`] over lessons plus the section list that feeds the
/// section selector and the section title shown on each row.
pub struct LessonScreen {
    screen: AdminScreen<Lesson>,
    sections_table: TableClient<Section>,
    sections: Vec<Section>,
    sections_error: Option<String>,
}

impl LessonScreen {
    pub fn new(
        lessons: TableClient<Lesson>,
        sections: TableClient<Section>,
        gate: AccessGate,
    ) -> Self {
        Self {
            screen: AdminScreen::new(lessons, gate, None),
            sections_table: sections,
            sections: Vec::new(),
            sections_error: None,
        }
    }

    /// Runs the admin check, then loads lessons and sections.
    pub async fn activate(&mut self) -> Access {
        let access = self.screen.activate().await;
        if access.is_allowed() {
            let _ = self.refresh_sections().await;
        } else {
            self.sections.clear();
            self.sections_error = None;
        }
        access
    }

    /// Reloads the selector options. A failure keeps the previous options.
    #[instrument(skip(self))]
    pub async fn refresh_sections(&mut self) -> Result<(), ScreenError> {
        if !self.screen.access().is_allowed() {
            return Err(ScreenError::AccessDenied);
        }
        match self.sections_table.select(Query::ordered()).await {
            Ok(sections) => {
                self.sections = sections;
                self.sections_error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Section options failed to load");
                self.sections_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Selector options, ascending by `order_index`.
    pub fn section_options(&self) -> &[Section] {
        &self.sections
    }

    pub fn sections_error(&self) -> Option<&str> {
        self.sections_error.as_deref()
    }

    /// Title of the section a lesson belongs to, if it is among the loaded options.
    pub fn section_title(&self, id: &SectionId) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.id() == id)
            .map(|s| s.title.as_str())
    }
}

impl Deref for LessonScreen {
    type Target = AdminScreen<Lesson>;

    fn deref(&self) -> &Self::Target {
        &self.screen
    }
}

impl DerefMut for LessonScreen {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.screen
    }
}
