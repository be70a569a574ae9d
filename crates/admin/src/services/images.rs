//! Image hosting service client.
//!
//! Product and content images are uploaded through the admin console to an
//! external image host; only the returned public URL is stored in the
//! database.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ImageHostConfig;

/// Upload request timeout (images can be a few megabytes).
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum accepted upload size in bytes (8 MiB).
pub const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Request body limit for the upload route. Sized above [`MAX_UPLOAD_BYTES`]
/// to leave room for multipart framing, so an oversized file reaches the
/// handler's own size check instead of a bare 413.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

/// Content types the image host accepts.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Errors that can occur talking to the image host.
#[derive(Debug, Error)]
pub enum ImageHostError {
    /// Transport-level failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The host rejected the upload.
    #[error("image host rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The host returned a body we could not interpret.
    #[error("invalid image host response: {0}")]
    InvalidResponse(String),
}

/// A successfully hosted image.
#[derive(Debug, Clone, Deserialize)]
pub struct HostedImage {
    /// Public URL to store and serve.
    pub url: String,
}

struct ImageHostClientInner {
    http: reqwest::Client,
    base_url: String,
    api_key: secrecy::SecretString,
}

/// Client for the image hosting service API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct ImageHostClient {
    inner: Arc<ImageHostClientInner>,
}

impl ImageHostClient {
    /// Create a new image host client.
    ///
    /// # Errors
    ///
    /// Returns `ImageHostError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ImageHostConfig) -> Result<Self, ImageHostError> {
        let http = reqwest::Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(ImageHostClientInner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                api_key: config.api_key.clone(),
            }),
        })
    }

    /// Upload an image and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns `ImageHostError::Rejected` when the host refuses the file,
    /// `ImageHostError::Http` on transport failures, and
    /// `ImageHostError::InvalidResponse` if the success body has no URL.
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<HostedImage, ImageHostError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| ImageHostError::InvalidResponse(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .inner
            .http
            .post(format!("{}/v1/images", self.inner.base_url))
            .bearer_auth(self.inner.api_key.expose_secret())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ImageHostError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let image: HostedImage = response
            .json()
            .await
            .map_err(|e| ImageHostError::InvalidResponse(e.to_string()))?;

        if image.url.is_empty() {
            return Err(ImageHostError::InvalidResponse(
                "upload response had an empty url".to_string(),
            ));
        }

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hosted_image_deserializes() {
        let image: HostedImage =
            serde_json::from_str(r#"{"url":"https://img.test/abc.jpg"}"#).expect("deserialize");
        assert_eq!(image.url, "https://img.test/abc.jpg");
    }

    #[test]
    fn allowed_content_types_cover_the_usual_suspects() {
        assert!(ALLOWED_CONTENT_TYPES.contains(&"image/jpeg"));
        assert!(!ALLOWED_CONTENT_TYPES.contains(&"image/gif"));
    }

    #[test]
    fn body_limit_leaves_room_for_multipart_framing() {
        // A file of exactly MAX_UPLOAD_BYTES must fit inside the request
        // body limit together with its multipart boundaries and headers.
        assert!(UPLOAD_BODY_LIMIT > MAX_UPLOAD_BYTES + 1024);
    }
}
