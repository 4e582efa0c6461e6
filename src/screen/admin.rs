//! # Admin Screen
//!
//! One list-and-form screen over a table of [`AdminResource`] rows. The screen keeps the
//! rendered list, the create form, at most one inline edit slot and the last inline error.
//!
//! ## Request / Apply
//!
//! Every remote action is split in two:
//!
//! 1. `request_*` checks access, validates the form and returns a [`Pending`] future that
//!    performs the remote calls. Nothing on the screen changes yet.
//! 2. [`AdminScreen::apply`] folds the resulting [`Completion`] back into the screen.
//!
//! Pending futures own everything they need, so several may be in flight at once and be
//! applied in any order. Each completion only touches the row it names. The plain `async`
//! methods (`refresh`, `create`, `save_edit`, `delete`) do both steps in a row.
//!
//! ## Access
//!
//! Until [`AdminScreen::activate`] resolves the admin check to `Allowed`, every action fails
//! with [`ScreenError::AccessDenied`] before any remote call is issued.

use crate::framework::{Query, RemoteError, TableClient};
use crate::screen::access::{Access, AccessGate};
use crate::screen::error::{Control, Notice, ScreenError};
use crate::screen::resource::AdminResource;
use crate::services::{ObjectStorage, StagedFile};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A remote action that has been issued but not applied to the screen.
pub type Pending<T> = Pin<Box<dyn Future<Output = Completion<T>> + Send + 'static>>;

/// The outcome of a [`Pending`] action.
#[derive(Debug)]
pub enum Completion<T: AdminResource> {
    Listed(Result<Vec<T>, RemoteError>),
    Created(Result<T, ScreenError>),
    Updated {
        id: T::Id,
        result: Result<T, ScreenError>,
    },
    Deleted {
        id: T::Id,
        result: Result<(), RemoteError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Viewing,
    Editing,
}

/// The row currently open for inline editing.
#[derive(Debug, Clone)]
pub struct EditSlot<T: AdminResource> {
    pub id: T::Id,
    pub draft: T::Draft,
    pub staged: Option<StagedFile>,
}

pub struct AdminScreen<T: AdminResource> {
    table: TableClient<T>,
    gate: AccessGate,
    storage: Option<Arc<dyn ObjectStorage>>,
    access: Access,
    items: Vec<T>,
    draft: T::Draft,
    staged: Option<StagedFile>,
    editing: Option<EditSlot<T>>,
    notice: Option<Notice<T::Id>>,
}

impl<T: AdminResource> AdminScreen<T> {
    /// `storage` is only consulted when `T` accepts assets.
    pub fn new(
        table: TableClient<T>,
        gate: AccessGate,
        storage: Option<Arc<dyn ObjectStorage>>,
    ) -> Self {
        Self {
            table,
            gate,
            storage,
            access: Access::Unresolved,
            items: Vec::new(),
            draft: T::Draft::default(),
            staged: None,
            editing: None,
            notice: None,
        }
    }

    pub fn access(&self) -> Access {
        self.access
    }

    /// The rendered list, in the order of the last fetch plus local edits.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn draft(&self) -> &T::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut T::Draft {
        &mut self.draft
    }

    pub fn staged(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    pub fn editing(&self) -> Option<&EditSlot<T>> {
        self.editing.as_ref()
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut T::Draft> {
        self.editing.as_mut().map(|slot| &mut slot.draft)
    }

    pub fn notice(&self) -> Option<&Notice<T::Id>> {
        self.notice.as_ref()
    }

    pub fn row_state(&self, id: &T::Id) -> RowState {
        match &self.editing {
            Some(slot) if &slot.id == id => RowState::Editing,
            _ => RowState::Viewing,
        }
    }

    /// Runs the admin check and, when allowed, the initial fetch.
    ///
    /// A failed fetch leaves the list empty with a notice on [`Control::List`]. Any other outcome
    /// drops what an earlier session left: the list, the edit slot and the notice.
    #[instrument(skip(self), fields(table = T::TABLE))]
    pub async fn activate(&mut self) -> Access {
        self.access = Access::Unresolved;
        self.access = self.gate.resolve().await;
        info!(access = ?self.access, "Screen activated");
        if self.access.is_allowed() {
            let _ = self.refresh().await;
        } else {
            self.items.clear();
            self.editing = None;
            self.notice = None;
        }
        self.access
    }

    fn ensure_allowed(&self) -> Result<(), ScreenError> {
        if self.access.is_allowed() {
            Ok(())
        } else {
            debug!(table = T::TABLE, access = ?self.access, "Action refused");
            Err(ScreenError::AccessDenied)
        }
    }

    fn find(&self, id: &T::Id) -> Result<&T, ScreenError> {
        self.items
            .iter()
            .find(|row| row.id() == id)
            .ok_or_else(|| ScreenError::UnknownRow(id.to_string()))
    }

    fn asset_store(&self) -> Result<Arc<dyn ObjectStorage>, ScreenError> {
        match &self.storage {
            Some(storage) if T::ACCEPTS_ASSETS => Ok(storage.clone()),
            _ => Err(ScreenError::AssetsUnsupported),
        }
    }

    pub fn request_refresh(&self) -> Result<Pending<T>, ScreenError> {
        self.ensure_allowed()?;
        let table = self.table.clone();
        Ok(Box::pin(async move {
            Completion::Listed(table.select(Query::ordered()).await)
        }))
    }

    /// Validates the create form. On failure the error is shown on [`Control::Create`] and no
    /// remote call is made.
    pub fn request_create(&mut self) -> Result<Pending<T>, ScreenError> {
        self.ensure_allowed()?;
        let mut params = match T::validate_draft(&self.draft) {
            Ok(params) => params,
            Err(e) => {
                debug!(table = T::TABLE, error = %e, "Create form invalid");
                self.notice = Some(Notice::new(Control::Create, &e));
                return Err(e.into());
            }
        };
        let upload = match self.staged.clone() {
            Some(file) => Some((self.asset_store()?, file)),
            None => None,
        };
        let table = self.table.clone();
        Ok(Box::pin(async move {
            let created = async {
                if let Some((storage, file)) = upload {
                    let url = storage.upload(file).await?;
                    T::attach_to_insert(&mut params, url);
                }
                Ok::<T, ScreenError>(table.insert(params).await?)
            };
            Completion::Created(created.await)
        }))
    }

    /// Validates the open edit slot into the full row to submit.
    pub fn request_save(&mut self) -> Result<Pending<T>, ScreenError> {
        self.ensure_allowed()?;
        let slot = self.editing.as_ref().ok_or(ScreenError::NotEditing)?;
        let id = slot.id.clone();
        let staged = slot.staged.clone();
        let mut row = match T::apply_draft(self.find(&id)?, &slot.draft) {
            Ok(row) => row,
            Err(e) => {
                debug!(table = T::TABLE, %id, error = %e, "Edit form invalid");
                self.notice = Some(Notice::new(Control::Edit(id), &e));
                return Err(e.into());
            }
        };
        let upload = match staged {
            Some(file) => Some((self.asset_store()?, file)),
            None => None,
        };
        let table = self.table.clone();
        Ok(Box::pin(async move {
            let updated = async {
                if let Some((storage, file)) = upload {
                    let url = storage.upload(file).await?;
                    row.attach_to_row(url);
                }
                Ok::<T, ScreenError>(table.update(row).await?)
            };
            Completion::Updated {
                id,
                result: updated.await,
            }
        }))
    }

    pub fn request_delete(&self, id: &T::Id) -> Result<Pending<T>, ScreenError> {
        self.ensure_allowed()?;
        let table = self.table.clone();
        let id = id.clone();
        Ok(Box::pin(async move {
            let result = table.delete(id.clone()).await;
            Completion::Deleted { id, result }
        }))
    }

    /// Folds a completed action into the screen and hands back its outcome.
    ///
    /// Failures keep the screen as it was and are shown on the control that issued them.
    #[instrument(skip_all, fields(table = T::TABLE))]
    pub fn apply(&mut self, completion: Completion<T>) -> Result<(), ScreenError> {
        match completion {
            Completion::Listed(Ok(rows)) => {
                info!(count = rows.len(), "Listed");
                self.items = rows;
                self.clear_notice(&Control::List);
                Ok(())
            }
            Completion::Listed(Err(e)) => {
                warn!(error = %e, "List failed");
                self.notice = Some(Notice::new(Control::List, &e));
                Err(e.into())
            }
            Completion::Created(Ok(row)) => {
                info!(id = %row.id(), "Created");
                self.items.push(row);
                self.draft = T::Draft::default();
                self.staged = None;
                self.clear_notice(&Control::Create);
                Ok(())
            }
            Completion::Created(Err(e)) => {
                warn!(error = %e, "Create failed");
                self.notice = Some(Notice::new(Control::Create, &e));
                Err(e)
            }
            Completion::Updated { id, result: Ok(row) } => {
                info!(%id, "Updated");
                if let Some(slot) = self.items.iter_mut().find(|r| r.id() == &id) {
                    *slot = row;
                }
                if self.editing.as_ref().is_some_and(|slot| slot.id == id) {
                    self.editing = None;
                }
                self.clear_notice(&Control::Edit(id));
                Ok(())
            }
            Completion::Updated { id, result: Err(e) } => {
                warn!(%id, error = %e, "Update failed");
                self.notice = Some(Notice::new(Control::Edit(id), &e));
                Err(e)
            }
            Completion::Deleted { id, result: Ok(()) } => {
                info!(%id, "Deleted");
                self.items.retain(|r| r.id() != &id);
                if self.editing.as_ref().is_some_and(|slot| slot.id == id) {
                    self.editing = None;
                }
                self.clear_notice(&Control::Delete(id));
                Ok(())
            }
            Completion::Deleted { id, result: Err(e) } => {
                warn!(%id, error = %e, "Delete failed");
                self.notice = Some(Notice::new(Control::Delete(id), &e));
                Err(e.into())
            }
        }
    }

    fn clear_notice(&mut self, control: &Control<T::Id>) {
        if self.notice.as_ref().is_some_and(|n| &n.control == control) {
            self.notice = None;
        }
    }

    /// Replaces the list with a fresh ordered fetch.
    pub async fn refresh(&mut self) -> Result<(), ScreenError> {
        let pending = self.request_refresh()?;
        let completion = pending.await;
        self.apply(completion)
    }

    /// Submits the create form. The new row is appended to the end of the list.
    pub async fn create(&mut self) -> Result<(), ScreenError> {
        let pending = self.request_create()?;
        let completion = pending.await;
        self.apply(completion)
    }

    /// Submits the open edit slot. The slot stays open if the update fails.
    pub async fn save_edit(&mut self) -> Result<(), ScreenError> {
        let pending = self.request_save()?;
        let completion = pending.await;
        self.apply(completion)
    }

    pub async fn delete(&mut self, id: &T::Id) -> Result<(), ScreenError> {
        let pending = self.request_delete(id)?;
        let completion = pending.await;
        self.apply(completion)
    }

    /// Opens `id` for inline editing, replacing any other open slot.
    pub fn begin_edit(&mut self, id: &T::Id) -> Result<(), ScreenError> {
        self.ensure_allowed()?;
        let draft = T::draft_from_row(self.find(id)?);
        self.editing = Some(EditSlot {
            id: id.clone(),
            draft,
            staged: None,
        });
        Ok(())
    }

    /// Drops the edit slot without any remote call.
    pub fn cancel_edit(&mut self) {
        if let Some(slot) = self.editing.take() {
            self.clear_notice(&Control::Edit(slot.id));
        }
    }

    /// Stages a file for the create form. Nothing is uploaded until the form is submitted.
    pub fn stage_asset(&mut self, file: StagedFile) -> Result<(), ScreenError> {
        self.ensure_allowed()?;
        self.asset_store()?;
        self.staged = Some(file);
        Ok(())
    }

    /// Stages a file for the open edit slot.
    pub fn stage_edit_asset(&mut self, file: StagedFile) -> Result<(), ScreenError> {
        self.ensure_allowed()?;
        self.asset_store()?;
        let slot = self.editing.as_mut().ok_or(ScreenError::NotEditing)?;
        slot.staged = Some(file);
        Ok(())
    }
}
