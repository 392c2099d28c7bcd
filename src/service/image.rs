//! Preview image fetching
//!
//! Relays token preview images to the display layer. The URL comes straight
//! from the catalog; no content-type validation happens here beyond echoing
//! what the upstream host returns.

use reqwest::Client;

#[derive(Debug, thiserror::Error)]
pub enum ImageFetchError {
    #[error("image request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("image request returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Fetched image bytes with the upstream content type
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// HTTP fetcher for token preview images
pub struct ImageFetcher {
    client: Client,
}

impl ImageFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent("markwatch/0.1")
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Fetch the preview image for relaying to the display layer
    pub async fn fetch(&self, url: &str) -> Result<FetchedImage, ImageFetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ImageFetchError::Status(response.status()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = response.bytes().await?.to_vec();

        Ok(FetchedImage {
            content_type,
            bytes,
        })
    }
}

impl Default for ImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}
