//! # Tana - Personal manga tracking-list client
//!
//! Tana is an async client library for a personal manga-tracking list. It
//! talks to a REST backend that owns the records, uploads cover images to an
//! object-storage bucket, and provides the view-state machinery a rendering
//! surface needs: a pure filter/search engine, a create/edit form state
//! machine with explicit payload construction, and a fetch adapter that
//! treats the backend as the single source of truth.
//!
//! ## Features
//!
//! - **List/Search/Filter**: Order-preserving, whitespace- and
//!   case-insensitive name search combined with a status filter
//! - **Create/Edit/Delete**: A guarded single-submission form session with
//!   upload-then-write cover handling and confirm-before-delete
//! - **Fresh Reads**: Every successful mutation is followed by a full
//!   re-fetch, never a local splice
//! - **Injectable Collaborators**: Backend, storage and confirmation sit
//!   behind traits, so all flows run against in-memory fakes in tests
//! - **Async/Await Support**: Built on tokio and reqwest with a pooled,
//!   timeout-guarded global HTTP client
//!
//! ## Quick Start
//!
//! ### Browsing and filtering
//!
//! ```rust,no_run
//! use tana::prelude::*;
//! use tana::error::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let api = MangaApi::new();
//!     let mut view = ListView::new();
//!
//!     view.refresh(&api).await;
//!     view.set_query("one piece");
//!     view.set_status_filter(Some(ReadingStatus::Reading));
//!
//!     for record in view.visible() {
//!         println!(
//!             "{} ({}/{})",
//!             record.name, record.completed_chapters, record.total_chapters
//!         );
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Creating a record with a cover
//!
//! ```rust,no_run
//! use tana::prelude::*;
//! use tana::error::Result;
//! use bytes::Bytes;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let api = MangaApi::new();
//!     let covers = SupabaseStorage::new(
//!         "https://abc123.supabase.co",
//!         "manga-covers",
//!         "anon-key",
//!     );
//!     let mut view = ListView::new();
//!
//!     view.open_create();
//!     if let Some(form) = view.form.form_mut() {
//!         form.data.name = "Vagabond".to_string();
//!         form.data.total_chapters = 327;
//!         form.data.cover = Some(CoverImage::Pending(PendingCover {
//!             file_name: "vagabond.jpg".to_string(),
//!             data: Bytes::from(std::fs::read("vagabond.jpg")?),
//!         }));
//!     }
//!
//!     // Uploads the cover first, then creates the record, then re-fetches
//!     view.submit(&api, &covers).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`view`]: The list view state container and injection seams
//! - [`filter`]: Pure derivation of the visible record subsequence
//! - [`form`]: Create/edit session state machine and payload builders
//! - [`api`]: REST client for the tracking backend
//! - [`storage`]: Cover upload client for the object-storage bucket
//! - [`net`]: Shared HTTP plumbing
//! - [`error`]: Error handling
//!
//! ## Terminal UI
//!
//! With the `tui` feature enabled, the `tana-tui` binary renders the list in
//! the terminal with incremental search, status-filter cycling, a form modal
//! and delete confirmation.

pub mod api;
pub mod error;
pub mod filter;
pub mod form;
pub mod net;
pub mod storage;
pub mod types;
pub mod view;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and traits, allowing
/// you to import everything you need with a single `use tana::prelude::*;`
/// statement.
///
/// # Example
///
/// ```rust
/// use tana::prelude::*;
///
/// // Now you have access to:
/// // - ListView, Confirm, AlwaysConfirm
/// // - MangaApi, RecordStore
/// // - SupabaseStorage, CoverStorage
/// // - ListFilter, visible_records
/// // - FormSession, FormMode, FormData
/// // - MangaRecord, ReadingStatus, ReleaseStatus, CoverImage, PendingCover
/// ```
pub mod prelude {
    pub use crate::{
        api::{MangaApi, RecordStore},
        filter::{ListFilter, ListFilterBuilder, visible_records},
        form::{FormData, FormMode, FormSession},
        storage::{CoverStorage, SupabaseStorage},
        types::{CoverImage, MangaRecord, PendingCover, ReadingStatus, ReleaseStatus},
        view::{AlwaysConfirm, Confirm, ListView},
    };

    #[cfg(feature = "tui")]
    pub use crate::tui::*;
}

// Re-export main types at crate root for direct access
pub use api::{MangaApi, RecordStore};
pub use error::{Error, Result};
pub use filter::{ListFilter, visible_records};
pub use form::{FormData, FormMode, FormSession};
pub use storage::{CoverStorage, SupabaseStorage};
pub use types::{CoverImage, MangaRecord, PendingCover, ReadingStatus, ReleaseStatus};
pub use view::{Confirm, ListView};
