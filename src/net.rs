//! HTTP plumbing shared by the tracking API and cover storage clients.
//!
//! This module provides the networking infrastructure for Tana:
//!
//! - **HTTP Client**: A global, configured HTTP client with connection pooling
//! - **Typed Requests**: JSON helpers for GET/POST/PUT plus raw-byte uploads
//! - **Status Mapping**: Non-2xx responses become [`Error::Api`](crate::Error::Api)
//!
//! There is deliberately no retry or backoff logic here: every failure is
//! surfaced to the caller and recovery is user initiated. The global client
//! carries a 30-second timeout so a hung request cannot leave the view
//! pending forever.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tana::net::HttpClient;
//! use tana::types::MangaRecord;
//!
//! # async fn example() -> tana::Result<()> {
//! let client = HttpClient::new();
//! let records: Vec<MangaRecord> = client
//!     .get_json("https://api.example.com/manga")
//!     .await?;
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use once_cell::sync::Lazy;
use reqwest::{Client, Response, header::HeaderMap};
use std::time::Duration;

use crate::error::{Error, Result};

/// Global HTTP client instance with optimized configuration.
///
/// This client is configured with:
/// - 30-second timeout
/// - Connection pooling (10 idle connections per host)
/// - Compression support (gzip, brotli)
/// - Custom User-Agent header
///
/// The client is created lazily on first use and reused across all HTTP
/// operations.
static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("Tana/0.1.0")
        .pool_max_idle_per_host(10)
        .gzip(true)
        .brotli(true)
        .build()
        .expect("Failed to build HTTP client")
});

/// Thin wrapper around the global client with per-instance default headers.
///
/// `HttpClient` provides the typed request surface used by
/// [`MangaApi`](crate::api::MangaApi) and
/// [`SupabaseStorage`](crate::storage::SupabaseStorage). Any non-2xx response
/// is converted into [`Error::Api`] with the response body preserved as the
/// message.
///
/// # Examples
///
/// ```rust
/// use tana::net::HttpClient;
///
/// let client = HttpClient::new()
///     .with_header("Authorization", "Bearer anon-key");
/// ```
#[derive(Clone, Debug, Default)]
pub struct HttpClient {
    headers: HeaderMap,
}

impl HttpClient {
    /// Creates a new HTTP client with no extra default headers.
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Adds a default header to all requests made by this client.
    ///
    /// Invalid header names or values are silently ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tana::net::HttpClient;
    ///
    /// let client = HttpClient::new()
    ///     .with_header("apikey", "anon-key")
    ///     .with_header("Authorization", "Bearer anon-key");
    /// ```
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            name.parse::<reqwest::header::HeaderName>(),
            value.parse::<reqwest::header::HeaderValue>(),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Performs a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// * [`Error::Network`] - Connection or timeout failures
    /// * [`Error::Api`] - Non-2xx status from the server
    /// * [`Error::Json`] - Response body that does not decode as `T`
    pub async fn get_json<T>(&self, url: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = CLIENT.get(url).headers(self.headers.clone()).send().await?;
        let bytes = Self::success_bytes(response).await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    /// Performs a POST request with a JSON body, discarding the response body.
    ///
    /// # Errors
    ///
    /// * [`Error::Network`] - Connection or timeout failures
    /// * [`Error::Api`] - Non-2xx status from the server
    pub async fn post_json<B>(&self, url: &str, body: &B) -> Result<()>
    where
        B: serde::Serialize + ?Sized,
    {
        let response = CLIENT
            .post(url)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await?;
        Self::success_bytes(response).await?;
        Ok(())
    }

    /// Performs a PUT request with a JSON body, discarding the response body.
    ///
    /// # Errors
    ///
    /// * [`Error::Network`] - Connection or timeout failures
    /// * [`Error::Api`] - Non-2xx status from the server
    pub async fn put_json<B>(&self, url: &str, body: &B) -> Result<()>
    where
        B: serde::Serialize + ?Sized,
    {
        let response = CLIENT
            .put(url)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await?;
        Self::success_bytes(response).await?;
        Ok(())
    }

    /// Performs a DELETE request, discarding the response body.
    ///
    /// # Errors
    ///
    /// * [`Error::Network`] - Connection or timeout failures
    /// * [`Error::Api`] - Non-2xx status from the server
    pub async fn delete(&self, url: &str) -> Result<()> {
        let response = CLIENT
            .delete(url)
            .headers(self.headers.clone())
            .send()
            .await?;
        Self::success_bytes(response).await?;
        Ok(())
    }

    /// Performs a POST request with a raw binary body.
    ///
    /// Used for object-storage uploads where the body is the file itself
    /// rather than JSON.
    ///
    /// # Errors
    ///
    /// * [`Error::Network`] - Connection or timeout failures
    /// * [`Error::Api`] - Non-2xx status from the server
    pub async fn post_bytes(&self, url: &str, content_type: &str, body: Bytes) -> Result<()> {
        let response = CLIENT
            .post(url)
            .headers(self.headers.clone())
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;
        Self::success_bytes(response).await?;
        Ok(())
    }

    /// Resolves a response into its body bytes, mapping non-2xx statuses to
    /// [`Error::Api`] with the body text preserved as the message.
    async fn success_bytes(response: Response) -> Result<Bytes> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.bytes().await?);
        }

        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.is_empty())
            .unwrap_or_else(|| status.to_string());
        Err(Error::api(status.as_u16(), message))
    }
}
