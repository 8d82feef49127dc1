//! Artwork uploads (the media library shared by all shops).

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::clients::{HttpClient, Paginator, RecordPaginator};
use crate::error::PrintifyError;
use crate::mapping::{self, parse_timestamp, FieldKind, FieldSpec, Record};
use crate::resources::{segment, serialize_to_query};

/// An uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: String,
    pub file_name: String,
    pub height: Option<u64>,
    pub width: Option<u64>,
    /// Size in bytes.
    pub size: Option<u64>,
    pub mime_type: Option<String>,
    pub preview_url: Option<String>,
    pub upload_time: Option<String>,
}

impl Record for Artwork {
    const NAME: &'static str = "Artwork";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::Identifier),
        FieldSpec::required("file_name", FieldKind::String),
        FieldSpec::optional("height", FieldKind::Unsigned),
        FieldSpec::optional("width", FieldKind::Unsigned),
        FieldSpec::optional("size", FieldKind::Unsigned),
        FieldSpec::optional("mime_type", FieldKind::String),
        FieldSpec::optional("preview_url", FieldKind::String),
        FieldSpec::optional("upload_time", FieldKind::String),
    ];
}

impl Artwork {
    /// Parses `upload_time`.
    #[must_use]
    pub fn uploaded_at(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        self.upload_time.as_deref().and_then(parse_timestamp)
    }
}

/// Where the bytes of a new upload come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtworkSource {
    /// A public URL Printify downloads from. The file name is the last path
    /// segment.
    Url(String),
    /// A local file, read and sent base64-encoded.
    File(PathBuf),
    /// In-memory bytes, sent base64-encoded.
    Bytes {
        /// Name shown in the media library.
        file_name: String,
        /// Raw image bytes.
        contents: Vec<u8>,
    },
}

/// The body posted to `uploads/images.json`.
///
/// Exactly one of `url` and `contents` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkUpload {
    pub file_name: String,
    pub url: Option<String>,
    /// Base64-encoded image.
    pub contents: Option<String>,
}

impl Record for ArtworkUpload {
    const NAME: &'static str = "ArtworkUpload";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("file_name", FieldKind::String),
        FieldSpec::optional("url", FieldKind::String),
        FieldSpec::optional("contents", FieldKind::String),
    ];
}

impl ArtworkSource {
    /// Resolves the source into an upload body, reading files if needed.
    ///
    /// # Errors
    ///
    /// Returns [`io::Error`] if a file cannot be read or has no file name.
    pub async fn into_upload(self) -> io::Result<ArtworkUpload> {
        match self {
            Self::Url(url) => Ok(ArtworkUpload {
                file_name: file_name_from_url(&url).to_string(),
                url: Some(url),
                contents: None,
            }),
            Self::File(path) => {
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .ok_or_else(|| {
                        io::Error::new(
                            io::ErrorKind::InvalidInput,
                            format!("'{}' has no file name", path.display()),
                        )
                    })?;
                let contents = tokio::fs::read(&path).await?;
                Ok(ArtworkUpload {
                    file_name,
                    url: None,
                    contents: Some(base64::engine::general_purpose::STANDARD.encode(contents)),
                })
            }
            Self::Bytes {
                file_name,
                contents,
            } => Ok(ArtworkUpload {
                file_name,
                url: None,
                contents: Some(base64::engine::general_purpose::STANDARD.encode(contents)),
            }),
        }
    }
}

fn file_name_from_url(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    match without_query.trim_end_matches('/').rsplit('/').next() {
        Some(name) if !name.is_empty() && !name.contains(':') => name,
        _ => url,
    }
}

/// Query parameters for [`ArtworkClient::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadListParams {
    /// Results per page (the API caps this at 100).
    pub limit: Option<u32>,
    /// First page to fetch.
    pub page: Option<u32>,
}

/// Client for `uploads*.json`.
#[derive(Clone, Debug)]
pub struct ArtworkClient {
    client: Arc<HttpClient>,
}

impl ArtworkClient {
    /// Creates an artwork client over a shared transport.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Walks the media library, lazily.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError::Validation`] if `params` cannot be encoded.
    pub fn list(&self, params: &UploadListParams) -> Result<RecordPaginator<Artwork>, PrintifyError> {
        let query = serialize_to_query(params)?;
        let paginator = Paginator::new(Arc::clone(&self.client), "uploads.json", Some(query));
        Ok(RecordPaginator::new(paginator))
    }

    /// Fetches one upload.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request or the mapping fails.
    pub async fn get(&self, image_id: &str) -> Result<Artwork, PrintifyError> {
        let path = format!("uploads/{}.json", segment(image_id));
        let body = self.client.get(&path, None, None).await?;
        Ok(mapping::from_value(&body)?)
    }

    /// Uploads an image.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError::Io`] if a local file cannot be read, otherwise
    /// [`PrintifyError`] if the request or the mapping fails.
    pub async fn upload(&self, source: ArtworkSource) -> Result<Artwork, PrintifyError> {
        let upload = source.into_upload().await?;
        tracing::debug!(file_name = %upload.file_name, "Uploading artwork");
        let body = self
            .client
            .post("uploads/images.json", None, Some(mapping::to_value(&upload)?))
            .await?;
        Ok(mapping::from_value(&body)?)
    }

    /// Archives an upload so it no longer shows in the library.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError`] if the request fails.
    pub async fn archive(&self, image_id: &str) -> Result<(), PrintifyError> {
        let path = format!("uploads/{}/archive.json", segment(image_id));
        self.client.post(&path, None, None).await?;
        Ok(())
    }
}
