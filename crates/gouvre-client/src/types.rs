//! Common types for the client SDK

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

// ==================== Options ====================

/// Options for uploading an image
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// Secret required to access the image later
    pub secret: Option<String>,
}

impl UploadOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Protect the upload with a secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// Options for downloading an image
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Secret the image was uploaded with
    pub secret: Option<String>,
}

impl DownloadOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Present a secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// Options for creating a link to an image
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkOptions {
    /// Link lifetime; the server default applies when unset
    pub expires: Option<Duration>,
    /// Secret the image was uploaded with
    pub secret: Option<String>,
}

impl LinkOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the link lifetime
    pub fn with_expires(mut self, expires: Duration) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Present a secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// Options for creating an upload link
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadLinkOptions {
    /// Link lifetime; the server default applies when unset
    pub expires: Option<Duration>,
    /// Secret to attach to the uploaded image
    pub secret: Option<String>,
    /// Thumbnail resolutions to generate once the upload lands
    pub resolutions: Vec<u32>,
}

impl UploadLinkOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the link lifetime
    pub fn with_expires(mut self, expires: Duration) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Attach a secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Request thumbnails at these resolutions
    pub fn with_resolutions(mut self, resolutions: impl IntoIterator<Item = u32>) -> Self {
        self.resolutions = resolutions.into_iter().collect();
        self
    }
}

/// Options for creating a single thumbnail link
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThumbnailLinkOptions {
    /// Link lifetime; the server default applies when unset
    pub expires: Option<Duration>,
    /// Secret the image was uploaded with
    pub secret: Option<String>,
    /// Center-crop to a square instead of keeping the aspect ratio
    pub square: bool,
}

impl ThumbnailLinkOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the link lifetime
    pub fn with_expires(mut self, expires: Duration) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Present a secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Request a square crop
    pub fn square(mut self) -> Self {
        self.square = true;
        self
    }
}

/// Options for creating thumbnail links for several images at once
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchThumbnailOptions {
    /// Link lifetime; the server default applies when unset
    pub expires: Option<Duration>,
    /// Secret shared by the images
    pub secret: Option<String>,
    /// Center-crop to a square instead of keeping the aspect ratio
    pub square: bool,
    /// Target thumbnail resolution in pixels
    pub resolution: u32,
}

impl BatchThumbnailOptions {
    /// Options for thumbnails at the given resolution
    pub fn new(resolution: u32) -> Self {
        Self {
            resolution,
            ..Default::default()
        }
    }

    /// Set the link lifetime
    pub fn with_expires(mut self, expires: Duration) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Present a secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Request square crops
    pub fn square(mut self) -> Self {
        self.square = true;
        self
    }
}

/// Treat an empty secret the same as an absent one
pub(crate) fn non_empty(secret: &Option<String>) -> Option<&str> {
    secret.as_deref().filter(|s| !s.is_empty())
}

// ==================== Request bodies ====================

/// Body of `POST /links`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateLinkRequest<'a> {
    pub filename: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<&'a str>,
}

/// Body of `POST /links/upload`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateUploadLinkRequest<'a> {
    pub filename: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<&'a str>,
    #[serde(skip_serializing_if = "<[u32]>::is_empty")]
    pub resolutions: &'a [u32],
}

/// Body of `POST /links/thumbnails`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateThumbnailLinkRequest<'a> {
    pub resolution: u32,
    pub filename: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<&'a str>,
}

/// Body of `POST /links/thumbnails/batch`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBatchThumbnailLinksRequest<'a> {
    pub resolution: u32,
    pub filenames: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<&'a str>,
}

/// Flat key/value rendering of a request body for form encoding.
///
/// Keys come out sorted, list fields repeat their key per element and
/// absent optional fields are left out.
pub(crate) trait FormFields {
    fn form_fields(&self) -> Vec<(&'static str, String)>;
}

impl FormFields for CreateLinkRequest<'_> {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("filename", self.filename.to_string())];
        fields.extend(self.secret.map(|s| ("secret", s.to_string())));
        fields
    }
}

impl FormFields for CreateUploadLinkRequest<'_> {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("filename", self.filename.to_string())];
        fields.extend(self.resolutions.iter().map(|r| ("resolutions", r.to_string())));
        fields.extend(self.secret.map(|s| ("secret", s.to_string())));
        fields
    }
}

impl FormFields for CreateThumbnailLinkRequest<'_> {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("filename", self.filename.to_string()),
            ("resolution", self.resolution.to_string()),
        ];
        fields.extend(self.secret.map(|s| ("secret", s.to_string())));
        fields
    }
}

impl FormFields for CreateBatchThumbnailLinksRequest<'_> {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields: Vec<_> = self.filenames.iter().map(|f| ("filenames", f.clone())).collect();
        fields.push(("resolution", self.resolution.to_string()));
        fields.extend(self.secret.map(|s| ("secret", s.to_string())));
        fields
    }
}

// ==================== Results ====================

/// A server-issued link
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResult {
    /// The link itself
    pub url: String,
    /// Expiry timestamp as reported by the server
    pub expires_at: String,
}

/// Links for a batch of thumbnails
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchThumbnailResult {
    /// Expiry timestamp shared by all links
    pub expires_at: String,
    /// Thumbnail link per requested filename
    #[serde(default)]
    pub filename_to_url: HashMap<String, String>,
}

/// The server's JSON error envelope
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Numeric status echoed by the server
    pub code: i64,
    /// Short status name
    pub status: String,
    /// Human-readable message
    #[serde(rename = "msg")]
    pub message: String,
    /// Underlying cause, when the server discloses one
    #[serde(rename = "error", default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
