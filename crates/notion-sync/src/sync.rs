//! Page synchronizer.
//!
//! Creates or updates a Notion page for an Annict work. Creation enriches the
//! gallery with Jikan pictures and the work's Open Graph cover image; updates
//! map the record as given.

use crate::api::{JikanClient, JikanError, NotionClient, NotionPage};
use crate::properties::{PageProperties, PropertyMapper};
use anyhow::{Context, Result};
use reqwest::{Client, Response};
use shared::{AnnictWork, Config};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Syncs Annict works into a Notion database
#[derive(Debug, Clone)]
pub struct PageSynchronizer {
    jikan: JikanClient,
    notion: NotionClient,
    mapper: PropertyMapper,
    database_id: String,
}

impl PageSynchronizer {
    /// Build a synchronizer from configuration; both clients share one connection pool
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.jikan.timeout_secs))
            .user_agent(concat!("notion-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::from_parts(
            JikanClient::with_client(client.clone(), &config.jikan.base_url)?,
            NotionClient::with_client(client, &config.notion),
            PropertyMapper::new(config.status_labels.clone()),
            config.notion.database_id.clone(),
        ))
    }

    pub fn from_parts(
        jikan: JikanClient,
        notion: NotionClient,
        mapper: PropertyMapper,
        database_id: String,
    ) -> Self {
        Self {
            jikan,
            notion,
            mapper,
            database_id,
        }
    }

    /// Gallery for a new page: the secure Open Graph image first, then Jikan pictures.
    ///
    /// A 404 from Jikan yields no pictures; any other lookup failure is returned.
    pub async fn collect_images(&self, work: &AnnictWork) -> Result<Vec<String>, JikanError> {
        let title = work.title.as_deref().unwrap_or_default();

        let mut images = match work.lookup_mal_id() {
            Some(mal_id) => match self.jikan.get_pictures(mal_id).await {
                Ok(pictures) => pictures.webp_urls(),
                Err(JikanError::NotFound { mal_id }) => {
                    warn!(
                        title = %title,
                        mal_id = %mal_id,
                        "No Jikan entry found, continuing without pictures"
                    );
                    Vec::new()
                }
                Err(e) => {
                    error!(title = %title, error = %e, "Jikan picture lookup failed");
                    return Err(e);
                }
            },
            None => {
                debug!(title = %title, "No MAL ID, skipping Jikan lookup");
                Vec::new()
            }
        };

        if let Some(cover) = work.secure_og_image_url() {
            images.insert(0, cover.to_string());
        }

        Ok(images)
    }

    /// Create a page for `work` in the configured database.
    ///
    /// No page is written if the picture lookup fails with anything but 404.
    pub async fn create_page(&self, work: &AnnictWork) -> Result<NotionPage> {
        let images = self.collect_images(work).await?;
        let properties = self.mapper.map(work, &images);

        let page = self
            .notion
            .create_page(&self.database_id, &properties)
            .await?;

        info!(
            title = work.title.as_deref().unwrap_or_default(),
            page_id = page.id.as_deref().unwrap_or_default(),
            images = images.len(),
            "Created Notion page"
        );

        Ok(page)
    }

    /// Update page `page_id` from `work`.
    ///
    /// Only `work.images` given as a URL list becomes the gallery; there is no
    /// Jikan lookup and no cover image merge. The returned future resolves to
    /// the raw response, whatever its status.
    pub fn edit_page(
        &self,
        page_id: &str,
        work: &AnnictWork,
    ) -> impl Future<Output = reqwest::Result<Response>> {
        let properties = self.edit_properties(work);
        self.notion.update_page(page_id, &properties)
    }

    /// Properties sent by [`edit_page`](Self::edit_page)
    pub fn edit_properties(&self, work: &AnnictWork) -> PageProperties {
        let images = work
            .images
            .as_ref()
            .map(|images| images.gallery_urls())
            .unwrap_or_default();
        self.mapper.map(work, images)
    }
}
