//! Core data types for tracked manga records and outgoing payloads.
//!
//! This module defines the fundamental data structures used throughout Tana:
//!
//! - [`MangaRecord`] - One tracked manga entry as the backend stores it
//! - [`ReadingStatus`] / [`ReleaseStatus`] - The two status enums
//! - [`CoverImage`] - Tagged cover state: persisted URL or pending upload
//! - [`CreateManga`] / [`UpdateManga`] - The two explicit write payloads
//!
//! # Examples
//!
//! ```rust
//! use tana::types::*;
//!
//! let record = MangaRecord {
//!     id: Some(1),
//!     name: "One Piece".to_string(),
//!     total_chapters: 1100,
//!     completed_chapters: 420,
//!     comment: Some("re-reading Water 7".to_string()),
//!     status: ReadingStatus::Reading,
//!     release_status: ReleaseStatus::Ongoing,
//!     cover_image: Some("https://example.com/covers/op.jpg".to_string()),
//!     user_id: Some(1),
//! };
//! ```

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One tracked manga entry, as stored by the backend.
///
/// This is the wire format of the tracking API (camelCase JSON). The `id` is
/// assigned by the backend and absent on records that have not been created
/// yet. Chapter counts are non-negative, but `completed_chapters` is allowed
/// to exceed `total_chapters`; the backend does not enforce that invariant
/// and neither does this client.
///
/// # Examples
///
/// ```rust
/// use tana::types::{MangaRecord, ReadingStatus, ReleaseStatus};
///
/// let record = MangaRecord {
///     id: Some(5),
///     name: "Bleach".to_string(),
///     total_chapters: 700,
///     completed_chapters: 690,
///     comment: None,
///     status: ReadingStatus::Reading,
///     release_status: ReleaseStatus::Finished,
///     cover_image: None,
///     user_id: Some(1),
/// };
/// assert_eq!(serde_json::to_value(&record).unwrap()["totalChapters"], 700);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaRecord {
    /// Backend-assigned identifier; `None` before creation
    pub id: Option<u64>,

    /// Display name, non-empty
    pub name: String,

    /// Published chapter count
    pub total_chapters: u32,

    /// Chapters the user has read
    pub completed_chapters: u32,

    /// Free-text note
    #[serde(default)]
    pub comment: Option<String>,

    /// Where the user is with this manga
    pub status: ReadingStatus,

    /// Whether the manga itself is still being published
    pub release_status: ReleaseStatus,

    /// Public URL of the cover, if one was uploaded
    #[serde(default)]
    pub cover_image: Option<String>,

    /// Owning user; attached at creation, never changed afterwards
    #[serde(default)]
    pub user_id: Option<u64>,
}

/// The user's reading status for a tracked manga.
///
/// The wire spelling of the first variant is `To_Read`, exactly as the
/// backend expects it; the remaining variants serialize as their names.
///
/// # Examples
///
/// ```rust
/// use tana::types::ReadingStatus;
///
/// let json = serde_json::to_string(&ReadingStatus::ToRead).unwrap();
/// assert_eq!(json, "\"To_Read\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingStatus {
    #[serde(rename = "To_Read")]
    ToRead,
    Reading,
    Completed,
    Dropped,
}

impl ReadingStatus {
    /// All statuses in display order, used for filter cycling and form
    /// selection.
    pub const ALL: [ReadingStatus; 4] = [
        ReadingStatus::ToRead,
        ReadingStatus::Reading,
        ReadingStatus::Completed,
        ReadingStatus::Dropped,
    ];

    /// Human-readable label for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tana::types::ReadingStatus;
    ///
    /// assert_eq!(ReadingStatus::ToRead.label(), "To Read");
    /// assert_eq!(ReadingStatus::Reading.label(), "Reading");
    /// ```
    pub fn label(&self) -> &'static str {
        match self {
            ReadingStatus::ToRead => "To Read",
            ReadingStatus::Reading => "Reading",
            ReadingStatus::Completed => "Completed",
            ReadingStatus::Dropped => "Dropped",
        }
    }
}

/// Publication status of the manga itself.
///
/// Serialized in the backend's SCREAMING_SNAKE_CASE spelling
/// (`ONGOING` / `FINISHED`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseStatus {
    Ongoing,
    Finished,
}

impl ReleaseStatus {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ReleaseStatus::Ongoing => "Ongoing",
            ReleaseStatus::Finished => "Finished",
        }
    }
}

/// Cover image state inside an edit session.
///
/// A cover is either already persisted (the backend knows it by URL) or a
/// locally selected file that still has to be uploaded to the storage
/// service. The two states are mutually exclusive; modelling them as a
/// tagged variant removes any runtime type inspection during submission.
///
/// # Examples
///
/// ```rust
/// use tana::types::{CoverImage, PendingCover};
/// use bytes::Bytes;
///
/// let persisted = CoverImage::Persisted("https://example.com/cover.jpg".to_string());
/// assert_eq!(persisted.preview_url(), Some("https://example.com/cover.jpg"));
///
/// let pending = CoverImage::Pending(PendingCover {
///     file_name: "cover.png".to_string(),
///     data: Bytes::from_static(b"\x89PNG..."),
/// });
/// assert_eq!(pending.preview_url(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CoverImage {
    /// A cover the storage service already holds, identified by public URL
    Persisted(String),
    /// A locally selected file awaiting upload
    Pending(PendingCover),
}

impl CoverImage {
    /// The URL to preview, available only for persisted covers.
    pub fn preview_url(&self) -> Option<&str> {
        match self {
            CoverImage::Persisted(url) => Some(url),
            CoverImage::Pending(_) => None,
        }
    }
}

/// A locally selected cover file that has not been uploaded yet.
///
/// The original filename is kept so the storage key can be derived from it;
/// the bytes are held in memory until submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCover {
    /// Original filename as picked by the user
    pub file_name: String,
    /// Raw file contents
    pub data: Bytes,
}

/// Payload for `POST /manga`.
///
/// Creation carries the owning `userId` and no `id` (the backend assigns
/// one). Built exclusively through
/// [`FormData::build_create_payload`](crate::form::FormData::build_create_payload),
/// which keeps the field set total and explicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateManga {
    pub name: String,
    pub total_chapters: u32,
    pub completed_chapters: u32,
    pub comment: Option<String>,
    pub status: ReadingStatus,
    pub release_status: ReleaseStatus,
    pub cover_image: Option<String>,
    pub user_id: u64,
}

/// Payload for `PUT /manga/{id}`.
///
/// Updates retain the record `id` but carry no `userId` field at all: the
/// backend does not accept ownership changes, so the type makes sending one
/// impossible rather than stripping it at submit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateManga {
    pub id: u64,
    pub name: String,
    pub total_chapters: u32,
    pub completed_chapters: u32,
    pub comment: Option<String>,
    pub status: ReadingStatus,
    pub release_status: ReleaseStatus,
    pub cover_image: Option<String>,
}
