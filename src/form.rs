//! Form state for a single create-or-edit session.
//!
//! The form session is the one piece of stateful machinery in the crate:
//!
//! ```text
//! Closed -> CreateOpen     -> (Submitting -> Closed | CreateOpen)
//! Closed -> EditOpen(rec)  -> (Submitting -> Closed | EditOpen)
//! ```
//!
//! A session holds the in-progress [`FormData`], knows whether it was opened
//! for create or edit, and guards against overlapping submissions: once
//! [`FormSession::begin_submit`] hands out a snapshot, further submit calls
//! are rejected until [`FormSession::finish_submit`] resolves the attempt.
//! A failed attempt keeps the form open with the entered data intact so the
//! user can retry.
//!
//! Payload construction lives here too, as two total, explicit builders:
//! [`FormData::build_create_payload`] attaches the owning `userId`, while
//! [`FormData::build_update_payload`] produces a type that cannot carry one.

use crate::{
    error::{Error, Result},
    types::{CoverImage, CreateManga, MangaRecord, ReadingStatus, ReleaseStatus, UpdateManga},
};

/// Default owning user for newly created records.
pub const DEFAULT_USER_ID: u64 = 1;

/// The editable fields of a create-or-edit session.
///
/// Defaults match a freshly opened create form: empty name, zero chapters,
/// `To_Read` / `ONGOING`, no cover, the fixed default user.
///
/// # Examples
///
/// ```rust
/// use tana::form::FormData;
/// use tana::types::{ReadingStatus, ReleaseStatus};
///
/// let data = FormData::default();
/// assert_eq!(data.status, ReadingStatus::ToRead);
/// assert_eq!(data.release_status, ReleaseStatus::Ongoing);
/// assert!(data.name.is_empty());
/// assert!(data.cover.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FormData {
    pub name: String,
    pub total_chapters: u32,
    pub completed_chapters: u32,
    pub comment: String,
    pub status: ReadingStatus,
    pub release_status: ReleaseStatus,
    pub cover: Option<CoverImage>,
    pub user_id: u64,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            name: String::new(),
            total_chapters: 0,
            completed_chapters: 0,
            comment: String::new(),
            status: ReadingStatus::ToRead,
            release_status: ReleaseStatus::Ongoing,
            cover: None,
            user_id: DEFAULT_USER_ID,
        }
    }
}

impl FormData {
    /// Seeds form data from an existing record for editing.
    ///
    /// The record's persisted cover URL carries over, so the preview shows
    /// the current cover until the user picks a new file.
    pub fn from_record(record: &MangaRecord) -> Self {
        Self {
            name: record.name.clone(),
            total_chapters: record.total_chapters,
            completed_chapters: record.completed_chapters,
            comment: record.comment.clone().unwrap_or_default(),
            status: record.status,
            release_status: record.release_status,
            cover: record.cover_image.clone().map(CoverImage::Persisted),
            user_id: record.user_id.unwrap_or(DEFAULT_USER_ID),
        }
    }

    /// Checks that the data can be submitted.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if the name is empty or whitespace only.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("Name must not be empty"));
        }
        Ok(())
    }

    /// Builds the `POST /manga` payload.
    ///
    /// `cover_url` is the resolved cover: the freshly uploaded URL for a
    /// pending file, the existing URL for a persisted cover, or `None`.
    /// An empty comment becomes `None` on the wire.
    pub fn build_create_payload(&self, cover_url: Option<String>) -> CreateManga {
        CreateManga {
            name: self.name.clone(),
            total_chapters: self.total_chapters,
            completed_chapters: self.completed_chapters,
            comment: self.wire_comment(),
            status: self.status,
            release_status: self.release_status,
            cover_image: cover_url,
            user_id: self.user_id,
        }
    }

    /// Builds the `PUT /manga/{id}` payload.
    ///
    /// The payload type has no `userId` field, so ownership can never leak
    /// into an update regardless of what the form holds.
    pub fn build_update_payload(&self, id: u64, cover_url: Option<String>) -> UpdateManga {
        UpdateManga {
            id,
            name: self.name.clone(),
            total_chapters: self.total_chapters,
            completed_chapters: self.completed_chapters,
            comment: self.wire_comment(),
            status: self.status,
            release_status: self.release_status,
            cover_image: cover_url,
        }
    }

    fn wire_comment(&self) -> Option<String> {
        let comment = self.comment.trim();
        if comment.is_empty() {
            None
        } else {
            Some(comment.to_string())
        }
    }
}

/// Whether the session was opened to create a new record or edit an existing
/// one. Edit retains the record `id` for routing the update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: u64 },
}

/// An open form with its mode, data and in-flight marker.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenForm {
    pub mode: FormMode,
    pub data: FormData,
    submitting: bool,
}

impl OpenForm {
    /// The cover URL to preview, if the session holds a persisted cover.
    pub fn preview_url(&self) -> Option<&str> {
        self.data.cover.as_ref().and_then(CoverImage::preview_url)
    }

    /// Returns `true` while a submission for this form is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

/// The form session state machine.
///
/// # Examples
///
/// ```rust
/// use tana::form::{FormMode, FormSession};
///
/// let mut session = FormSession::default();
/// assert!(!session.is_open());
///
/// session.open_create(1);
/// session.form_mut().unwrap().data.name = "Vagabond".to_string();
///
/// let (mode, data) = session.begin_submit().unwrap();
/// assert_eq!(mode, FormMode::Create);
/// assert_eq!(data.name, "Vagabond");
///
/// // Success closes the form
/// session.finish_submit(true);
/// assert!(!session.is_open());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormSession {
    #[default]
    Closed,
    Open(OpenForm),
}

impl FormSession {
    /// Opens the form for creation, resetting all fields to defaults.
    pub fn open_create(&mut self, user_id: u64) {
        *self = FormSession::Open(OpenForm {
            mode: FormMode::Create,
            data: FormData {
                user_id,
                ..FormData::default()
            },
            submitting: false,
        });
    }

    /// Opens the form for editing, seeded from `record`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if the record has no backend `id` yet.
    pub fn open_edit(&mut self, record: &MangaRecord) -> Result<()> {
        let id = record
            .id
            .ok_or_else(|| Error::validation("Cannot edit a record without an id"))?;

        *self = FormSession::Open(OpenForm {
            mode: FormMode::Edit { id },
            data: FormData::from_record(record),
            submitting: false,
        });
        Ok(())
    }

    /// Closes the form, discarding any entered data.
    pub fn close(&mut self) {
        *self = FormSession::Closed;
    }

    /// Returns `true` if a session is open.
    pub fn is_open(&self) -> bool {
        matches!(self, FormSession::Open(_))
    }

    /// The open form, if any.
    pub fn form(&self) -> Option<&OpenForm> {
        match self {
            FormSession::Open(form) => Some(form),
            FormSession::Closed => None,
        }
    }

    /// Mutable access to the open form for field edits.
    pub fn form_mut(&mut self) -> Option<&mut OpenForm> {
        match self {
            FormSession::Open(form) => Some(form),
            FormSession::Closed => None,
        }
    }

    /// Starts a submission attempt, returning a snapshot of the session.
    ///
    /// Validates the data, marks the session as submitting, and hands back
    /// the mode and data the caller should act on. The snapshot decouples
    /// the network calls from the live form state, so the user keeps their
    /// entered data if the attempt fails.
    ///
    /// # Errors
    ///
    /// * [`Error::Validation`] - No open session, or data that fails
    ///   [`FormData::validate`]
    /// * [`Error::SubmitInFlight`] - A previous attempt has not resolved yet
    pub fn begin_submit(&mut self) -> Result<(FormMode, FormData)> {
        let form = match self {
            FormSession::Open(form) => form,
            FormSession::Closed => {
                return Err(Error::validation("No form is open"));
            }
        };

        if form.submitting {
            return Err(Error::SubmitInFlight);
        }
        form.data.validate()?;

        form.submitting = true;
        Ok((form.mode, form.data.clone()))
    }

    /// Resolves the in-flight submission attempt.
    ///
    /// Success closes the form; failure re-enables it with the entered data
    /// intact for retry. A call without an in-flight attempt is a no-op.
    pub fn finish_submit(&mut self, success: bool) {
        match self {
            FormSession::Open(form) if form.submitting => {
                if success {
                    *self = FormSession::Closed;
                } else {
                    form.submitting = false;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReleaseStatus;

    fn sample_record() -> MangaRecord {
        MangaRecord {
            id: Some(5),
            name: "Bleach".to_string(),
            total_chapters: 700,
            completed_chapters: 690,
            comment: Some("soul society".to_string()),
            status: ReadingStatus::Reading,
            release_status: ReleaseStatus::Finished,
            cover_image: Some("https://example.com/bleach.jpg".to_string()),
            user_id: Some(1),
        }
    }

    #[test]
    fn test_open_create_resets_defaults() {
        let mut session = FormSession::default();
        session.open_create(1);

        let form = session.form().unwrap();
        assert_eq!(form.mode, FormMode::Create);
        assert_eq!(form.data, FormData::default());
        assert!(form.preview_url().is_none());
    }

    #[test]
    fn test_open_edit_seeds_from_record() {
        let mut session = FormSession::default();
        session.open_edit(&sample_record()).unwrap();

        let form = session.form().unwrap();
        assert_eq!(form.mode, FormMode::Edit { id: 5 });
        assert_eq!(form.data.name, "Bleach");
        assert_eq!(form.data.comment, "soul society");
        assert_eq!(form.preview_url(), Some("https://example.com/bleach.jpg"));
    }

    #[test]
    fn test_open_edit_rejects_unsaved_record() {
        let mut record = sample_record();
        record.id = None;

        let mut session = FormSession::default();
        assert!(matches!(
            session.open_edit(&record),
            Err(Error::Validation(_))
        ));
        assert!(!session.is_open());
    }

    #[test]
    fn test_double_submit_guard() {
        let mut session = FormSession::default();
        session.open_create(1);
        session.form_mut().unwrap().data.name = "Vagabond".to_string();

        assert!(session.begin_submit().is_ok());
        assert!(matches!(
            session.begin_submit(),
            Err(Error::SubmitInFlight)
        ));

        // Failure re-enables submission with data intact
        session.finish_submit(false);
        assert_eq!(session.form().unwrap().data.name, "Vagabond");
        assert!(session.begin_submit().is_ok());
    }

    #[test]
    fn test_validation_blocks_empty_name() {
        let mut session = FormSession::default();
        session.open_create(1);

        assert!(matches!(
            session.begin_submit(),
            Err(Error::Validation(_))
        ));
        // Rejected attempt does not leave the session stuck submitting
        assert!(!session.form().unwrap().is_submitting());
    }

    #[test]
    fn test_update_payload_has_no_user_id_key() {
        let data = FormData::from_record(&sample_record());
        let payload = data.build_update_payload(5, Some("https://example.com/bleach.jpg".into()));

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["id"], 5);
        assert!(json.get("userId").is_none());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_create_payload_carries_user_id_and_no_id() {
        let data = FormData {
            name: "Dorohedoro".to_string(),
            ..FormData::default()
        };
        let payload = data.build_create_payload(None);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["userId"], DEFAULT_USER_ID);
        assert!(json.get("id").is_none());
        assert_eq!(json["coverImage"], serde_json::Value::Null);
    }

    #[test]
    fn test_empty_comment_becomes_null() {
        let data = FormData {
            name: "Dorohedoro".to_string(),
            comment: "   ".to_string(),
            ..FormData::default()
        };
        assert_eq!(data.build_create_payload(None).comment, None);
    }
}
