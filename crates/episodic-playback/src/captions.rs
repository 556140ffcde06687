//! Fetching caption tracks.
//!
//! The fetch is the only suspending step in the playback path, so it lives
//! outside the controller: [`PlaybackController::attach`] hands out a
//! [`CaptionRequest`], the host resolves it against a [`CaptionSource`], and
//! the resulting [`CaptionResponse`] goes back through
//! [`PlaybackController::captions_loaded`].
//!
//! [`PlaybackController::attach`]: crate::PlaybackController::attach
//! [`PlaybackController::captions_loaded`]: crate::PlaybackController::captions_loaded

use std::time::Duration;

use episodic_captions::{parse, Cue};
use reqwest::Client;
use thiserror::Error;

/// Caption fetch failures. These never reach the user as errors; the
/// controller downgrades them to "no captions".
#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("caption request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("caption track unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can turn a caption URL into WebVTT text.
#[async_trait::async_trait]
pub trait CaptionSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, CaptionError>;
}

/// Fetches caption tracks over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCaptionSource {
    client: Client,
}

impl HttpCaptionSource {
    /// Build a source whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build caption HTTP client with timeout: {}", e);
                Client::new()
            });
        Self { client }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpCaptionSource {
    fn default() -> Self {
        Self::with_client(Client::new())
    }
}

#[async_trait::async_trait]
impl CaptionSource for HttpCaptionSource {
    async fn fetch(&self, url: &str) -> Result<String, CaptionError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CaptionError::Unavailable(format!("{url} returned {status}")));
        }
        Ok(response.text().await?)
    }
}

/// A pending caption fetch, tagged with the attachment that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionRequest {
    pub generation: u64,
    pub url: String,
}

impl CaptionRequest {
    /// Fetch and parse the track.
    pub async fn resolve<S>(self, source: &S) -> CaptionResponse
    where
        S: CaptionSource + ?Sized,
    {
        let cues = source.fetch(&self.url).await.map(|text| parse(&text));
        if let Ok(cues) = &cues {
            tracing::debug!(url = %self.url, cues = cues.len(), "Parsed caption track");
        }
        CaptionResponse {
            generation: self.generation,
            cues,
        }
    }
}

/// Outcome of a [`CaptionRequest`].
#[derive(Debug)]
pub struct CaptionResponse {
    pub generation: u64,
    pub cues: Result<Vec<Cue>, CaptionError>,
}
