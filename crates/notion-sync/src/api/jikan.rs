//! Jikan API client used to look up supplementary pictures.
//!
//! Requests are made exactly once; there is no retry or rate limiting.

use super::types::PicturesResponse;
use anyhow::{bail, Context, Result};
use reqwest::{Client, StatusCode, Url};
use shared::MalAnimeId;
use thiserror::Error;
use tracing::debug;

/// Errors returned by the Jikan client
#[derive(Debug, Error)]
pub enum JikanError {
    /// Jikan answered 404 for this anime
    #[error("Anime not found on Jikan: mal_id={mal_id}")]
    NotFound { mal_id: String },

    /// Transport failure, non-2xx status or undecodable body
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Jikan API v4 client
#[derive(Debug, Clone)]
pub struct JikanClient {
    /// HTTP client
    client: Client,
    /// Base URL for Jikan API
    base_url: Url,
}

impl JikanClient {
    /// Create a client on top of an existing connection pool
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid Jikan base URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Invalid Jikan base URL: {}", base_url);
        }

        Ok(Self { client, base_url })
    }

    /// `{base}/anime/{mal_id}/pictures`, with the ID escaped as a single path segment
    pub fn pictures_url(&self, mal_id: &MalAnimeId) -> Url {
        let mut url = self.base_url.clone();
        let id = mal_id.to_string();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["anime", id.as_str(), "pictures"]);
        }
        url
    }

    /// Fetch the picture list for an anime
    pub async fn get_pictures(&self, mal_id: &MalAnimeId) -> Result<PicturesResponse, JikanError> {
        let url = self.pictures_url(mal_id);
        debug!(url = %url, "Fetching pictures");

        let response = self.client.get(url.clone()).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(JikanError::NotFound {
                mal_id: mal_id.to_string(),
            });
        }

        let pictures = response.error_for_status()?.json::<PicturesResponse>().await?;
        debug!(url = %url, count = pictures.data.len(), "Pictures fetched");
        Ok(pictures)
    }
}
