//! Tracking backend client and the [`RecordStore`] seam.
//!
//! The backend is a plain REST collaborator holding the authoritative copy of
//! the list. This module defines the trait the rest of the crate programs
//! against and the [`MangaApi`] implementation that talks to the real
//! service. Keeping the trait between the view logic and reqwest means the
//! whole submit/refresh choreography is testable against an in-memory fake.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tana::api::{MangaApi, RecordStore};
//!
//! # async fn example() -> tana::Result<()> {
//! let api = MangaApi::new();
//! let records = api.list().await?;
//! println!("Tracking {} manga", records.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use url::Url;

use crate::{
    error::{Error, Result},
    net::HttpClient,
    types::{CreateManga, MangaRecord, UpdateManga},
};

/// Base URL of the hosted tracking backend.
pub const DEFAULT_BASE_URL: &str = "https://manga-springboot.onrender.com/api";

/// Backend operations the view layer depends on.
///
/// Implementations must treat the backend as the source of truth: callers
/// re-fetch the full collection after every successful mutation instead of
/// patching local state.
///
/// # Examples
///
/// ```rust
/// use tana::api::RecordStore;
/// use tana::types::{CreateManga, MangaRecord, UpdateManga};
/// use async_trait::async_trait;
///
/// struct InMemoryStore {
///     records: std::sync::Mutex<Vec<MangaRecord>>,
/// }
///
/// #[async_trait]
/// impl RecordStore for InMemoryStore {
///     async fn list(&self) -> tana::Result<Vec<MangaRecord>> {
///         Ok(self.records.lock().unwrap().clone())
///     }
///
///     async fn create(&self, payload: &CreateManga) -> tana::Result<()> {
///         // Implementation here
/// #       Ok(())
///     }
///
///     async fn update(&self, id: u64, payload: &UpdateManga) -> tana::Result<()> {
///         // Implementation here
/// #       Ok(())
///     }
///
///     async fn delete(&self, id: u64) -> tana::Result<()> {
///         // Implementation here
/// #       Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetches the full collection.
    async fn list(&self) -> Result<Vec<MangaRecord>>;

    /// Creates a new record. The backend assigns the `id`.
    async fn create(&self, payload: &CreateManga) -> Result<()>;

    /// Replaces the record with the given `id`.
    async fn update(&self, id: u64, payload: &UpdateManga) -> Result<()>;

    /// Removes the record with the given `id`.
    async fn delete(&self, id: u64) -> Result<()>;
}

/// REST client for the manga tracking backend.
///
/// Wraps the four collection endpoints:
///
/// | Operation | Method | Path |
/// |-----------|--------|--------------|
/// | List all  | GET    | `/manga`     |
/// | Create    | POST   | `/manga`     |
/// | Update    | PUT    | `/manga/{id}`|
/// | Delete    | DELETE | `/manga/{id}`|
///
/// # Examples
///
/// ```rust
/// use tana::api::MangaApi;
///
/// // Hosted backend
/// let api = MangaApi::new();
///
/// // Self-hosted backend
/// let api = MangaApi::with_base_url("http://localhost:8080/api").unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct MangaApi {
    client: HttpClient,
    base_url: String,
}

impl MangaApi {
    /// Creates a client against the hosted backend.
    pub fn new() -> Self {
        Self {
            client: HttpClient::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a client against a custom backend base URL.
    ///
    /// The URL is validated up front; trailing slashes are trimmed so path
    /// joining stays uniform.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if the URL does not parse.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url)
            .map_err(|e| Error::validation(format!("Invalid base URL '{}': {}", base_url, e)))?;

        Ok(Self {
            client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/manga", self.base_url)
    }

    fn record_url(&self, id: u64) -> String {
        format!("{}/manga/{}", self.base_url, id)
    }
}

impl Default for MangaApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MangaApi {
    async fn list(&self) -> Result<Vec<MangaRecord>> {
        self.client.get_json(&self.collection_url()).await
    }

    async fn create(&self, payload: &CreateManga) -> Result<()> {
        self.client.post_json(&self.collection_url(), payload).await
    }

    async fn update(&self, id: u64, payload: &UpdateManga) -> Result<()> {
        self.client.put_json(&self.record_url(id), payload).await
    }

    async fn delete(&self, id: u64) -> Result<()> {
        self.client.delete(&self.record_url(id)).await
    }
}
