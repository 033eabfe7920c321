//! The list view state container.
//!
//! [`ListView`] owns everything a rendering surface needs: the fetched
//! collection, the loading flag, the last error, the active
//! [`ListFilter`](crate::filter::ListFilter) and the
//! [`FormSession`](crate::form::FormSession). It holds no authoritative
//! data; after every successful mutation it discards local state and
//! re-fetches the full collection from the backend.
//!
//! The backend, the cover storage and the delete confirmation are injected
//! through the [`RecordStore`], [`CoverStorage`] and [`Confirm`] traits, so
//! the whole choreography runs unchanged against in-memory fakes in tests.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tana::prelude::*;
//!
//! # async fn example() -> tana::Result<()> {
//! let api = MangaApi::new();
//! let mut view = ListView::new();
//!
//! view.refresh(&api).await;
//! for record in view.visible() {
//!     println!("{} [{}]", record.name, record.status.label());
//! }
//!
//! view.filter.query = "one piece".to_string();
//! println!("{} matches", view.visible().len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::{
    api::RecordStore,
    error::Result,
    filter::{ListFilter, visible_records},
    form::{DEFAULT_USER_ID, FormData, FormMode, FormSession},
    storage::CoverStorage,
    types::{CoverImage, MangaRecord, ReadingStatus},
};

/// Asks the user to confirm a destructive action.
///
/// Injected into [`ListView::delete`] so the delete flow is testable without
/// a real prompt. Implementations may be interactive (a TUI dialog) or
/// scripted (a test double).
#[async_trait]
pub trait Confirm: Send + Sync {
    /// Returns `true` if the user approves the action described by `prompt`.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// A [`Confirm`] implementation that approves everything.
///
/// Useful for non-interactive callers that have gathered consent elsewhere.
pub struct AlwaysConfirm;

#[async_trait]
impl Confirm for AlwaysConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// View state for the manga list.
///
/// Fields the rendering surface mutates directly (`filter`, `form`) are
/// public; the collection and the flags derived from backend calls are only
/// updated through the async operations.
#[derive(Default)]
pub struct ListView {
    records: Vec<MangaRecord>,
    loading: bool,
    error: Option<String>,

    /// Active search and status filter
    pub filter: ListFilter,
    /// Create/edit session state
    pub form: FormSession,

    user_id: u64,
}

impl ListView {
    /// Creates a view for the default user.
    pub fn new() -> Self {
        Self::for_user(DEFAULT_USER_ID)
    }

    /// Creates a view whose created records belong to `user_id`.
    pub fn for_user(user_id: u64) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    /// The full fetched collection, unfiltered.
    pub fn records(&self) -> &[MangaRecord] {
        &self.records
    }

    /// The visible sub-sequence under the active filter, in collection
    /// order.
    pub fn visible(&self) -> Vec<&MangaRecord> {
        visible_records(&self.records, &self.filter)
    }

    /// `true` while a collection fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last surfaced error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clears the surfaced error, typically after the UI has shown it.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Sets the free-text query. Cheap enough to call on every keystroke.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    /// Sets or clears the status filter (`None` shows all).
    pub fn set_status_filter(&mut self, status: Option<ReadingStatus>) {
        self.filter.status = status;
    }

    /// Replaces the collection with a fresh full read from the backend.
    ///
    /// On failure the previous collection stays in place and the error
    /// message is surfaced through [`ListView::error`]. The loading flag is
    /// cleared on both paths.
    pub async fn refresh(&mut self, store: &dyn RecordStore) {
        self.loading = true;
        match store.list().await {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(format!("Failed to fetch mangas: {}", e));
            }
        }
        self.loading = false;
    }

    /// Opens the form for creating a new record.
    pub fn open_create(&mut self) {
        self.form.open_create(self.user_id);
    }

    /// Opens the form for editing the record with the given `id`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`](crate::Error::Validation) if no such record is
    /// in the fetched collection.
    pub fn open_edit(&mut self, id: u64) -> Result<()> {
        let record = self
            .records
            .iter()
            .find(|r| r.id == Some(id))
            .cloned()
            .ok_or_else(|| crate::Error::validation(format!("No manga with id {}", id)))?;
        self.form.open_edit(&record)
    }

    /// Closes the form, discarding entered data.
    pub fn close_form(&mut self) {
        self.form.close();
    }

    /// Submits the open form session.
    ///
    /// The steps, in order:
    ///
    /// 1. Take a validated snapshot from the session (rejects double
    ///    submits).
    /// 2. Resolve the cover: upload a pending file to storage first, pass a
    ///    persisted URL through unchanged. A failed upload aborts the whole
    ///    submission before any record write.
    /// 3. Send the explicit create or update payload.
    /// 4. On success close the form and re-fetch the collection; on failure
    ///    keep the form open with the entered data intact and surface the
    ///    error.
    ///
    /// # Errors
    ///
    /// Any error from validation, the upload or the record write. The same
    /// error is also surfaced through [`ListView::error`].
    pub async fn submit(
        &mut self,
        store: &dyn RecordStore,
        covers: &dyn CoverStorage,
    ) -> Result<()> {
        let (mode, data) = self.form.begin_submit()?;

        let result = Self::upload_and_write(store, covers, mode, &data).await;
        match &result {
            Ok(()) => {
                self.form.finish_submit(true);
                self.refresh(store).await;
            }
            Err(e) => {
                self.form.finish_submit(false);
                self.error = Some(format!("Error saving manga: {}", e));
            }
        }
        result
    }

    async fn upload_and_write(
        store: &dyn RecordStore,
        covers: &dyn CoverStorage,
        mode: FormMode,
        data: &FormData,
    ) -> Result<()> {
        // Upload-then-write: no record may reference a cover that was never
        // stored.
        let cover_url = match &data.cover {
            Some(CoverImage::Pending(pending)) => Some(
                covers
                    .upload(&pending.file_name, pending.data.clone())
                    .await?,
            ),
            Some(CoverImage::Persisted(url)) => Some(url.clone()),
            None => None,
        };

        match mode {
            FormMode::Create => store.create(&data.build_create_payload(cover_url)).await,
            FormMode::Edit { id } => store.update(id, &data.build_update_payload(id, cover_url)).await,
        }
    }

    /// Deletes the record with the given `id` after confirmation.
    ///
    /// A declined confirmation issues no backend call and returns
    /// `Ok(false)`. Otherwise the delete is sent and the collection is
    /// re-fetched regardless of the delete outcome; a delete failure is
    /// still surfaced as an error.
    pub async fn delete(
        &mut self,
        store: &dyn RecordStore,
        confirm: &dyn Confirm,
        id: u64,
    ) -> Result<bool> {
        if !confirm.confirm("Delete this manga?").await {
            return Ok(false);
        }

        let result = store.delete(id).await;
        self.refresh(store).await;
        // Surface the delete failure even when the refresh itself succeeded
        if let Err(e) = &result {
            self.error = Some(format!("Error deleting manga: {}", e));
        }
        result.map(|()| true)
    }
}
