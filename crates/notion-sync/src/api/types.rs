//! Jikan and Notion response types.
//!
//! Every nested field is optional so that a partial payload decodes to
//! absent values instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of `GET /anime/{id}/pictures`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PicturesResponse {
    #[serde(default)]
    pub data: Vec<Picture>,
}

/// One picture entry, offered in several formats
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Picture {
    #[serde(default)]
    pub jpg: Option<ImageSet>,
    #[serde(default)]
    pub webp: Option<ImageSet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSet {
    pub image_url: Option<String>,
    pub small_image_url: Option<String>,
    pub large_image_url: Option<String>,
}

impl Picture {
    /// The WebP image URL, if the entry has one
    pub fn webp_url(&self) -> Option<&str> {
        self.webp.as_ref().and_then(|w| w.image_url.as_deref())
    }
}

impl PicturesResponse {
    /// WebP URLs in response order, skipping entries without one
    pub fn webp_urls(&self) -> Vec<String> {
        self.data
            .iter()
            .filter_map(Picture::webp_url)
            .map(str::to_string)
            .collect()
    }
}

/// A page object returned by the Notion API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotionPage {
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub last_edited_time: Option<String>,
    /// Everything else the API returned
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
