//! Cover image storage and the [`CoverStorage`] seam.
//!
//! Covers are kept outside the tracking backend, in an object-storage bucket
//! that serves them back over public URLs. The submit flow uploads a pending
//! file first and only then writes the record, so a failed upload never
//! leaves a record pointing at a cover that does not exist.
//!
//! The shipped implementation targets a Supabase-style storage API; anything
//! that can turn a filename and bytes into a public URL can stand in through
//! the [`CoverStorage`] trait.

use async_trait::async_trait;
use bytes::Bytes;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    error::{Error, Result},
    net::HttpClient,
};

/// Uploads cover files and hands back publicly resolvable URLs.
///
/// # Examples
///
/// ```rust
/// use tana::storage::CoverStorage;
/// use async_trait::async_trait;
/// use bytes::Bytes;
///
/// struct NullStorage;
///
/// #[async_trait]
/// impl CoverStorage for NullStorage {
///     async fn upload(&self, file_name: &str, data: Bytes) -> tana::Result<String> {
///         Ok(format!("https://covers.invalid/{}", file_name))
///     }
/// }
/// ```
#[async_trait]
pub trait CoverStorage: Send + Sync {
    /// Uploads `data` under a key derived from `file_name` and returns the
    /// public URL of the stored object.
    async fn upload(&self, file_name: &str, data: Bytes) -> Result<String>;
}

/// Supabase-style object storage client for the cover bucket.
///
/// Objects are written to `POST {base}/storage/v1/object/{bucket}/{key}` and
/// served back from `{base}/storage/v1/object/public/{bucket}/{key}`. Keys
/// are derived from the upload time and the sanitized original filename, so
/// repeated uploads of the same file never collide.
///
/// # Examples
///
/// ```rust
/// use tana::storage::SupabaseStorage;
///
/// let storage = SupabaseStorage::new(
///     "https://abc123.supabase.co",
///     "manga-covers",
///     "anon-key",
/// );
/// ```
#[derive(Clone, Debug)]
pub struct SupabaseStorage {
    client: HttpClient,
    base_url: String,
    bucket: String,
}

impl SupabaseStorage {
    /// Creates a storage client for the given project, bucket and API key.
    pub fn new(
        base_url: impl Into<String>,
        bucket: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let api_key = api_key.into();
        Self {
            client: HttpClient::new()
                .with_header("apikey", &api_key)
                .with_header("Authorization", &format!("Bearer {}", api_key)),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
        }
    }

    fn upload_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            urlencoding::encode(key)
        )
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            urlencoding::encode(key)
        )
    }
}

#[async_trait]
impl CoverStorage for SupabaseStorage {
    async fn upload(&self, file_name: &str, data: Bytes) -> Result<String> {
        let key = object_key(file_name);
        let content_type = content_type_for(file_name);

        match self
            .client
            .post_bytes(&self.upload_url(&key), content_type, data)
            .await
        {
            Ok(()) => Ok(self.public_url(&key)),
            Err(Error::Api { status, message }) => Err(Error::upload(format!(
                "storage replied HTTP {}: {}",
                status, message
            ))),
            Err(e) => Err(e),
        }
    }
}

/// Derives a unique object key from the current time and the original
/// filename.
///
/// # Examples
///
/// ```rust
/// use tana::storage::object_key;
///
/// let key = object_key("My Cover.png");
/// assert!(key.starts_with("manga-"));
/// assert!(key.ends_with("-My Cover.png"));
/// ```
pub fn object_key(file_name: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("manga-{}-{}", millis, sanitize_filename(file_name))
}

/// Sanitizes a filename by replacing invalid characters.
///
/// This function removes or replaces characters that are not allowed in
/// object keys or filenames on most systems.
///
/// # Examples
///
/// ```rust
/// use tana::storage::sanitize_filename;
///
/// let clean = sanitize_filename("cover: final?.png");
/// assert_eq!(clean, "cover_ final_.png");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
    let mut sanitized = name.to_string();

    for &ch in &invalid_chars {
        sanitized = sanitized.replace(ch, "_");
    }

    // Trim whitespace and limit length, backing up to a char boundary so
    // multibyte filenames never split mid-character
    sanitized = sanitized.trim().to_string();
    if sanitized.len() > 200 {
        let mut end = 200;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized.truncate(end);
    }

    // Ensure we have a valid filename
    if sanitized.is_empty() {
        sanitized = "untitled".to_string();
    }

    sanitized
}

/// Picks a MIME type from the filename extension.
///
/// Unknown extensions fall back to `application/octet-stream`; the storage
/// service stores the object either way.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit('.')
        .next()
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
