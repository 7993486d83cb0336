//! Data models for the sync pipeline.
//!
//! The Annict work record is read-only input produced by the tracking service
//! client. Every field is optional: missing or `null` values deserialize to
//! `None` rather than failing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Anime work record from Annict
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnictWork {
    #[serde(default)]
    pub title: Option<String>,
    /// Annict work ID
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub status: Option<WorkStatus>,
    #[serde(default)]
    pub season_name_text: Option<String>,
    #[serde(default)]
    pub media_text: Option<String>,
    #[serde(default)]
    pub official_site_url: Option<String>,
    #[serde(default)]
    pub twitter_username: Option<String>,
    #[serde(default)]
    pub images: Option<WorkImages>,
    /// MyAnimeList ID, used as the Jikan lookup key
    #[serde(default)]
    pub mal_anime_id: Option<MalAnimeId>,
}

/// The viewer's watch status for a work
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkStatus {
    /// `wanna_watch`, `watching`, `watched`, `on_hold`, `stop_watching` or `no_select`
    #[serde(default)]
    pub kind: Option<String>,
}

/// Images attached to a work.
///
/// Annict sends an object with social preview metadata. Callers updating a
/// page may pass a plain list of URLs instead; only that form is usable as a
/// gallery without enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkImages {
    Urls(Vec<String>),
    Sources(ImageSources),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSources {
    #[serde(default)]
    pub facebook: Option<FacebookImage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacebookImage {
    #[serde(default)]
    pub og_image_url: Option<String>,
}

impl WorkImages {
    /// URLs usable directly as gallery entries
    pub fn gallery_urls(&self) -> &[String] {
        match self {
            WorkImages::Urls(urls) => urls,
            WorkImages::Sources(_) => &[],
        }
    }

    /// The Open Graph cover image, if any
    pub fn og_image_url(&self) -> Option<&str> {
        match self {
            WorkImages::Sources(sources) => sources
                .facebook
                .as_ref()
                .and_then(|f| f.og_image_url.as_deref()),
            WorkImages::Urls(_) => None,
        }
    }
}

/// MyAnimeList ID. Annict serializes it as a string, but numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MalAnimeId {
    Number(u64),
    Text(String),
}

impl MalAnimeId {
    /// Returns false for an empty or whitespace-only string ID
    pub fn is_present(&self) -> bool {
        match self {
            MalAnimeId::Number(_) => true,
            MalAnimeId::Text(s) => !s.trim().is_empty(),
        }
    }
}

impl fmt::Display for MalAnimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalAnimeId::Number(n) => write!(f, "{}", n),
            MalAnimeId::Text(s) => write!(f, "{}", s.trim()),
        }
    }
}

impl AnnictWork {
    /// Watch status kind, if set
    pub fn status_kind(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.kind.as_deref())
    }

    /// Cover image from the record's Open Graph metadata, only when served over https
    pub fn secure_og_image_url(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(WorkImages::og_image_url)
            .filter(|url| url.starts_with("https://"))
    }

    /// MAL ID usable for a Jikan lookup
    pub fn lookup_mal_id(&self) -> Option<&MalAnimeId> {
        self.mal_anime_id.as_ref().filter(|id| id.is_present())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_annict_work() {
        let work: AnnictWork = serde_json::from_value(json!({
            "id": 4168,
            "title": "SHIROBAKO",
            "status": { "kind": "watched" },
            "season_name_text": "2014年秋",
            "media_text": "TV",
            "official_site_url": "http://shirobako-anime.com",
            "twitter_username": "shirobako_anime",
            "mal_anime_id": "25835",
            "images": {
                "recommended_url": "http://shirobako-anime.com/images/ogp.jpg",
                "facebook": { "og_image_url": "https://shirobako-anime.com/images/ogp.jpg" },
                "twitter": { "image_url": null }
            },
            "episodes_count": 24
        }))
        .unwrap();

        assert_eq!(work.id, Some(4168));
        assert_eq!(work.status_kind(), Some("watched"));
        assert_eq!(work.mal_anime_id, Some(MalAnimeId::Text("25835".to_string())));
        assert_eq!(
            work.secure_og_image_url(),
            Some("https://shirobako-anime.com/images/ogp.jpg")
        );
        assert!(work.images.unwrap().gallery_urls().is_empty());
    }

    #[test]
    fn test_nulls_and_missing_fields() {
        let work: AnnictWork = serde_json::from_value(json!({
            "title": null,
            "status": null,
            "images": { "facebook": null },
            "mal_anime_id": null
        }))
        .unwrap();

        assert!(work.title.is_none());
        assert!(work.status_kind().is_none());
        assert!(work.secure_og_image_url().is_none());
        assert!(work.lookup_mal_id().is_none());
    }

    #[test]
    fn test_insecure_og_image_is_ignored() {
        let work: AnnictWork = serde_json::from_value(json!({
            "images": { "facebook": { "og_image_url": "http://example.com/a.jpg" } }
        }))
        .unwrap();
        assert!(work.secure_og_image_url().is_none());
    }

    #[test]
    fn test_images_as_url_list() {
        let work: AnnictWork = serde_json::from_value(json!({
            "images": ["https://example.com/1.jpg", "https://example.com/2.jpg"]
        }))
        .unwrap();
        let images = work.images.unwrap();
        assert_eq!(images.gallery_urls().len(), 2);
        assert!(images.og_image_url().is_none());
    }

    #[test]
    fn test_mal_anime_id_forms() {
        let numeric: AnnictWork = serde_json::from_value(json!({ "mal_anime_id": 25835 })).unwrap();
        assert_eq!(numeric.lookup_mal_id().unwrap().to_string(), "25835");

        let blank: AnnictWork = serde_json::from_value(json!({ "mal_anime_id": " " })).unwrap();
        assert!(blank.lookup_mal_id().is_none());
    }
}
