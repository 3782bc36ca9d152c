//! The bookmark list with its add/edit form.

use crate::form::BookmarkForm;
use crate::form::FormErrors;
use crate::pagination::Pagination;
use crate::probe::UrlProbe;
use bookmarky_store::Bookmark;
use bookmarky_store::BookmarkStore;
use bookmarky_store::StoreError;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Whether the form adds a new bookmark or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Browsing,
    /// Only entered for an id that resolved to a stored bookmark.
    Editing { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Bookmark),
    Updated(Bookmark),
    /// The bookmark being edited disappeared before the update landed.
    EditTargetGone { id: String },
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(FormErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    NotFound,
}

/// A page of the list, borrowed from the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Position of the first item of this page in the whole collection.
    pub offset: usize,
    pub items: &'a [Bookmark],
}

pub struct OverviewController<P> {
    store: BookmarkStore,
    probe: P,
    state: EditState,
    form: BookmarkForm,
    errors: FormErrors,
    bookmarks: Vec<Bookmark>,
    pagination: Pagination,
}

impl<P: UrlProbe> OverviewController<P> {
    /// Build the controller and load the collection.
    pub fn new(store: BookmarkStore, probe: P, page_size: usize) -> Self {
        let mut controller = Self {
            store,
            probe,
            state: EditState::Browsing,
            form: BookmarkForm::default(),
            errors: FormErrors::default(),
            bookmarks: Vec::new(),
            pagination: Pagination::new(page_size),
        };
        controller.reload();
        controller
    }

    /// Re-read the collection from the store and re-slice the current page.
    pub fn reload(&mut self) {
        self.bookmarks = self.store.get_all();
        self.pagination.update(self.bookmarks.len());
    }

    /// Start editing `id`. Returns `false` and falls back to browsing when no
    /// loaded bookmark has that id.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        match self.bookmarks.iter().find(|b| b.id == id) {
            Some(bookmark) => {
                self.form.patch(bookmark);
                self.errors = FormErrors::default();
                self.state = EditState::Editing { id: id.to_string() };
                true
            }
            None => {
                tracing::debug!("edit target {id} not found; back to overview");
                self.cancel_edit();
                false
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.state, EditState::Editing { .. }) {
            self.form.reset();
        }
        self.errors = FormErrors::default();
        self.state = EditState::Browsing;
    }

    /// Validate, probe the URL, then create or update.
    ///
    /// On rejection the form keeps its values and [`Self::errors`] describes
    /// what went wrong; nothing is written.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let valid = match self.form.validate() {
            Ok(valid) => valid,
            Err(errors) => return Err(self.reject(errors)),
        };

        if let Err(e) = self.probe.probe(&valid.url).await {
            tracing::info!("url {} not reachable: {e}", valid.url);
            return Err(self.reject(FormErrors::not_reachable()));
        }

        let outcome = match &self.state {
            EditState::Editing { id } => {
                let id = id.clone();
                match self.store.update(valid.into_bookmark(id.clone())) {
                    Ok(updated) => SubmitOutcome::Updated(updated),
                    Err(StoreError::NotFound(_)) => SubmitOutcome::EditTargetGone { id },
                    Err(e) => return Err(e.into()),
                }
            }
            EditState::Browsing => SubmitOutcome::Created(self.store.create(valid.into_draft())?),
        };

        self.form.reset();
        self.errors = FormErrors::default();
        self.state = EditState::Browsing;
        self.reload();
        Ok(outcome)
    }

    /// Delete `id` once `confirm` agrees. The prompt sees the stored record.
    pub fn delete(
        &mut self,
        id: &str,
        confirm: impl FnOnce(&Bookmark) -> bool,
    ) -> Result<DeleteOutcome, StoreError> {
        let Some(bookmark) = self.bookmarks.iter().find(|b| b.id == id) else {
            return Ok(DeleteOutcome::NotFound);
        };
        if !confirm(bookmark) {
            return Ok(DeleteOutcome::Cancelled);
        }
        let removed = self.store.delete(id)?;
        if matches!(&self.state, EditState::Editing { id: editing } if editing == id) {
            self.cancel_edit();
        }
        self.reload();
        Ok(if removed {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        })
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.pagination.go_to(page)
    }

    pub fn page(&self) -> Page<'_> {
        Page {
            number: self.pagination.current(),
            total_pages: self.pagination.total_pages(),
            total_items: self.bookmarks.len(),
            offset: self.pagination.offset(self.bookmarks.len()),
            items: self.pagination.slice(&self.bookmarks),
        }
    }

    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        self.pagination.page_numbers()
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn form(&self) -> &BookmarkForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookmarkForm {
        &mut self.form
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn store(&self) -> &BookmarkStore {
        &self.store
    }

    fn reject(&mut self, errors: FormErrors) -> SubmitError {
        self.errors = errors.clone();
        SubmitError::Invalid(errors)
    }
}
