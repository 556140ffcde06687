//! Read-only mirror of a peer catalog service.

use std::time::Duration;

use episodic_common::{Episode, EpisodeId, EpisodeSummary, Error, Result};
use reqwest::{Client, StatusCode};

/// Reads episodes from another instance's HTTP API.
#[derive(Debug, Clone)]
pub struct RemoteMirror {
    client: Client,
    base_url: String,
}

impl RemoteMirror {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build mirror HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// `GET /api/episodes`
    pub async fn list(&self) -> Result<Vec<EpisodeSummary>> {
        let response = self
            .client
            .get(self.url("/episodes"))
            .send()
            .await
            .map_err(|e| Error::remote(format!("Failed to list episodes: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::remote(format!(
                "Mirror returned {} listing episodes",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| Error::remote(format!("Invalid episode list from mirror: {}", e)))
    }

    /// `GET /api/episodes/{id}`; a 404 is `Ok(None)`.
    pub async fn get(&self, id: &EpisodeId) -> Result<Option<Episode>> {
        let response = self
            .client
            .get(self.url(&format!("/episodes/{id}")))
            .send()
            .await
            .map_err(|e| Error::remote(format!("Failed to fetch episode {}: {}", id, e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response
                .json()
                .await
                .map(Some)
                .map_err(|e| Error::remote(format!("Invalid episode {} from mirror: {}", id, e))),
            status => Err(Error::remote(format!(
                "Mirror returned {} for episode {}",
                status, id
            ))),
        }
    }
}
