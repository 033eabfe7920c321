//! Error types and result handling for Tana operations.
//!
//! This module defines the error handling system used throughout Tana.
//! All operations return a [`Result<T>`] which is a type alias for
//! `std::result::Result<T, Error>`.
//!
//! # Error Categories
//!
//! Tana errors are categorized into several types:
//!
//! - **Network Errors**: Connection issues, timeouts, HTTP transport errors
//! - **API Errors**: Non-success status codes from the tracking backend
//! - **Upload Errors**: Cover image uploads rejected by the storage service
//! - **Validation Errors**: Form input that cannot be submitted as-is
//! - **Submit In Flight**: A second submission attempted while one is pending
//! - **JSON Errors**: Serialization/deserialization failures
//! - **IO Errors**: File system or other IO operations
//!
//! None of these are fatal: every failure leaves the view state usable so the
//! user can correct the input or simply retry.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tana::error::{Error, Result};
//! use tana::api::{MangaApi, RecordStore};
//!
//! # async fn example() -> Result<()> {
//! let api = MangaApi::new();
//! match api.list().await {
//!     Ok(records) => println!("Fetched {} records", records.len()),
//!     Err(Error::Api { status, message }) => println!("Backend said {status}: {message}"),
//!     Err(Error::Network(e)) => println!("Network error: {}", e),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Type alias for Results with Tana errors.
///
/// This is a convenience type alias that represents the standard Result type
/// with Tana's [`enum@Error`] as the error type. All public APIs in Tana
/// return this Result type.
///
/// # Examples
///
/// ```rust
/// use tana::{Result, Error};
///
/// fn example_operation() -> Result<String> {
///     Ok("Success".to_string())
/// }
///
/// fn example_with_error() -> Result<()> {
///     Err(Error::validation("Name must not be empty"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all Tana operations.
///
/// This enum covers the error conditions that can occur while talking to the
/// tracking backend and the cover storage service, plus the purely local
/// conditions raised by the form controller.
#[derive(Error, Debug)]
pub enum Error {
    /// Network-related errors from HTTP operations.
    ///
    /// This variant wraps errors from the underlying HTTP client (reqwest),
    /// including connection timeouts, DNS resolution failures, and HTTP
    /// transport errors.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success response from the tracking backend.
    ///
    /// Raised when the backend answers a list, create, update or delete call
    /// with anything outside the 2xx range. The status code and the response
    /// body (when readable) are preserved for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tana::Error;
    ///
    /// let error = Error::api(404, "no manga with id 42");
    /// ```
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Cover image upload rejected by the storage service.
    ///
    /// When this is returned during submission, no record write has been
    /// issued: the upload always happens first and failure short-circuits
    /// the whole submission.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tana::Error;
    ///
    /// let error = Error::upload("bucket quota exceeded");
    /// ```
    #[error("Upload error: {0}")]
    Upload(String),

    /// Form input that cannot be submitted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tana::Error;
    ///
    /// let error = Error::validation("Name must not be empty");
    /// ```
    #[error("Validation error: {0}")]
    Validation(String),

    /// A submission was attempted while another one is still in flight.
    ///
    /// The form session only ever allows a single pending submission; a
    /// second submit call is rejected with this error instead of issuing
    /// overlapping backend writes.
    #[error("A submission is already in flight")]
    SubmitInFlight,

    /// JSON serialization and deserialization errors.
    ///
    /// This variant wraps errors from serde_json when decoding backend
    /// responses or encoding outgoing payloads.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system and IO operation errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an API error with the given status code and message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tana::Error;
    ///
    /// let error = Error::api(500, "internal server error");
    /// ```
    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        Error::Api {
            status,
            message: msg.into(),
        }
    }

    /// Creates an upload error with the given message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tana::Error;
    ///
    /// let error = Error::upload("storage replied HTTP 403");
    /// ```
    pub fn upload(msg: impl Into<String>) -> Self {
        Error::Upload(msg.into())
    }

    /// Creates a validation error with the given message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tana::Error;
    ///
    /// let error = Error::validation("totalChapters must be a number");
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}
