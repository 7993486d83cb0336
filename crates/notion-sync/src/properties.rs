//! Mapping from an Annict work to Notion page properties.
//!
//! Only fields with a value are emitted. Omitted properties are left untouched
//! by Notion on update, so absence is never written as `null`.

use serde::ser::{Serialize, SerializeMap, Serializer};
use shared::AnnictWork;
use std::collections::BTreeMap;

pub const TITLE: &str = "タイトル";
pub const ANNICT_ID: &str = "annict_id";
pub const ANNICT_STATUS: &str = "annict_status";
pub const ANNICT_SEASON: &str = "annict_season";
pub const ANNICT_MEDIA: &str = "annict_media";
pub const OFFICIAL_SITE: &str = "公式サイト";
pub const OFFICIAL_TWITTER: &str = "公式Twitter";
pub const IMAGES: &str = "画像";

/// Display name given to every external file in the gallery
pub const IMAGE_FILE_NAME: &str = "visual";

const TWITTER_BASE_URL: &str = "https://twitter.com/";

/// A typed Notion property value, serialized in the API's shape
/// (`{"select": {"name": ...}}`, `{"number": 1}`, ...)
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Title(Vec<RichText>),
    Number(i64),
    Select(SelectOption),
    Url(String),
    Files(Vec<FileObject>),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RichText {
    pub text: TextContent,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FileObject {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub external: ExternalFile,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExternalFile {
    pub url: String,
}

impl PropertyValue {
    pub fn title(content: &str) -> Self {
        PropertyValue::Title(vec![RichText {
            text: TextContent {
                content: content.to_string(),
            },
        }])
    }

    pub fn select(name: &str) -> Self {
        PropertyValue::Select(SelectOption {
            name: name.to_string(),
        })
    }

    pub fn url(url: impl Into<String>) -> Self {
        PropertyValue::Url(url.into())
    }

    pub fn external_files(urls: &[String]) -> Self {
        PropertyValue::Files(
            urls.iter()
                .map(|url| FileObject {
                    kind: "external",
                    name: IMAGE_FILE_NAME.to_string(),
                    external: ExternalFile { url: url.clone() },
                })
                .collect(),
        )
    }
}

/// Ordered set of page properties, serialized as a JSON object in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageProperties {
    entries: Vec<(&'static str, PropertyValue)>,
}

impl PageProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property
    pub fn insert(&mut self, name: &'static str, value: PropertyValue) {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PageProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Maps Annict works to Notion properties using a status label table
#[derive(Debug, Clone)]
pub struct PropertyMapper {
    status_labels: BTreeMap<String, String>,
}

impl PropertyMapper {
    pub fn new(status_labels: BTreeMap<String, String>) -> Self {
        Self { status_labels }
    }

    /// Notion select label for an Annict status kind
    pub fn status_label(&self, kind: &str) -> Option<&str> {
        self.status_labels
            .get(kind)
            .map(String::as_str)
            .filter(|label| !label.is_empty())
    }

    /// Build the property set for `work` with the given gallery images
    pub fn map(&self, work: &AnnictWork, images: &[String]) -> PageProperties {
        let mut properties = PageProperties::new();

        if let Some(title) = non_empty(&work.title) {
            properties.insert(TITLE, PropertyValue::title(title));
        }
        // Zero is a valid ID
        if let Some(id) = work.id {
            properties.insert(ANNICT_ID, PropertyValue::Number(id));
        }
        if let Some(label) = work.status_kind().and_then(|kind| self.status_label(kind)) {
            properties.insert(ANNICT_STATUS, PropertyValue::select(label));
        }
        if let Some(season) = non_empty(&work.season_name_text) {
            properties.insert(ANNICT_SEASON, PropertyValue::select(season));
        }
        if let Some(media) = non_empty(&work.media_text) {
            properties.insert(ANNICT_MEDIA, PropertyValue::select(media));
        }
        if let Some(site) = non_empty(&work.official_site_url) {
            properties.insert(OFFICIAL_SITE, PropertyValue::url(site));
        }
        if let Some(username) = non_empty(&work.twitter_username) {
            properties.insert(
                OFFICIAL_TWITTER,
                PropertyValue::url(format!("{}{}", TWITTER_BASE_URL, username)),
            );
        }
        if !images.is_empty() {
            properties.insert(IMAGES, PropertyValue::external_files(images));
        }

        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::WorkStatus;

    fn mapper() -> PropertyMapper {
        PropertyMapper::new(shared::Config::default().status_labels)
    }

    fn full_work() -> AnnictWork {
        AnnictWork {
            title: Some("SHIROBAKO".to_string()),
            id: Some(4168),
            status: Some(WorkStatus {
                kind: Some("watching".to_string()),
            }),
            season_name_text: Some("2014年秋".to_string()),
            media_text: Some("TV".to_string()),
            official_site_url: Some("http://shirobako-anime.com".to_string()),
            twitter_username: Some("shirobako_anime".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_mapping() {
        let images = vec!["https://example.com/a.jpg".to_string()];
        let properties = mapper().map(&full_work(), &images);

        assert_eq!(
            serde_json::to_value(&properties).unwrap(),
            json!({
                "タイトル": { "title": [ { "text": { "content": "SHIROBAKO" } } ] },
                "annict_id": { "number": 4168 },
                "annict_status": { "select": { "name": "見てる" } },
                "annict_season": { "select": { "name": "2014年秋" } },
                "annict_media": { "select": { "name": "TV" } },
                "公式サイト": { "url": "http://shirobako-anime.com" },
                "公式Twitter": { "url": "https://twitter.com/shirobako_anime" },
                "画像": { "files": [
                    { "type": "external", "name": "visual", "external": { "url": "https://example.com/a.jpg" } }
                ] }
            })
        );
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let properties = mapper().map(&full_work(), &[]);
        let names: Vec<_> = properties.names().collect();
        assert_eq!(
            names,
            vec![
                TITLE,
                ANNICT_ID,
                ANNICT_STATUS,
                ANNICT_SEASON,
                ANNICT_MEDIA,
                OFFICIAL_SITE,
                OFFICIAL_TWITTER
            ]
        );

        let serialized = serde_json::to_string(&properties).unwrap();
        assert!(serialized.find(TITLE).unwrap() < serialized.find(OFFICIAL_TWITTER).unwrap());
    }

    #[test]
    fn test_empty_title_is_omitted() {
        let mut work = full_work();
        work.title = Some(String::new());
        assert!(!mapper().map(&work, &[]).contains(TITLE));

        work.title = None;
        assert!(!mapper().map(&work, &[]).contains(TITLE));
    }

    #[test]
    fn test_zero_id_is_included() {
        let work = AnnictWork {
            id: Some(0),
            ..Default::default()
        };
        let properties = mapper().map(&work, &[]);
        assert_eq!(properties.get(ANNICT_ID), Some(&PropertyValue::Number(0)));
        assert_eq!(properties.len(), 1);
    }

    #[test]
    fn test_unknown_status_is_omitted() {
        let mut work = full_work();
        work.status = Some(WorkStatus {
            kind: Some("no_select".to_string()),
        });
        assert!(!mapper().map(&work, &[]).contains(ANNICT_STATUS));

        work.status = Some(WorkStatus { kind: None });
        assert!(!mapper().map(&work, &[]).contains(ANNICT_STATUS));
    }

    #[test]
    fn test_empty_record_maps_to_nothing() {
        let properties = mapper().map(&AnnictWork::default(), &[]);
        assert!(properties.is_empty());
        assert_eq!(serde_json::to_value(&properties).unwrap(), json!({}));
    }

    #[test]
    fn test_empty_strings_are_omitted() {
        let work = AnnictWork {
            season_name_text: Some(String::new()),
            media_text: Some(String::new()),
            official_site_url: Some(String::new()),
            twitter_username: Some(String::new()),
            ..Default::default()
        };
        assert!(mapper().map(&work, &[]).is_empty());
    }

    #[test]
    fn test_twitter_url() {
        let work = AnnictWork {
            twitter_username: Some("precure_9".to_string()),
            ..Default::default()
        };
        assert_eq!(
            mapper().map(&work, &[]).get(OFFICIAL_TWITTER),
            Some(&PropertyValue::url("https://twitter.com/precure_9"))
        );
    }

    #[test]
    fn test_gallery_keeps_image_order() {
        let images = vec![
            "https://example.com/a.jpg".to_string(),
            "https://cdn.example.com/x.webp".to_string(),
            "https://cdn.example.com/y.webp".to_string(),
        ];
        let properties = mapper().map(&AnnictWork::default(), &images);

        match properties.get(IMAGES) {
            Some(PropertyValue::Files(files)) => {
                let urls: Vec<_> = files.iter().map(|f| f.external.url.as_str()).collect();
                assert_eq!(urls, images.iter().map(String::as_str).collect::<Vec<_>>());
                assert!(files.iter().all(|f| f.name == IMAGE_FILE_NAME && f.kind == "external"));
            }
            other => panic!("unexpected gallery: {:?}", other),
        }
    }

    #[test]
    fn test_insert_replaces_existing_value() {
        let mut properties = PageProperties::new();
        properties.insert(ANNICT_ID, PropertyValue::Number(1));
        properties.insert(ANNICT_ID, PropertyValue::Number(2));
        assert_eq!(properties.len(), 1);
        assert_eq!(properties.get(ANNICT_ID), Some(&PropertyValue::Number(2)));
    }
}
