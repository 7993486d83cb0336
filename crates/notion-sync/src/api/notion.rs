//! Notion pages API client.

use super::types::NotionPage;
use crate::properties::PageProperties;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use shared::config::NotionConfig;
use std::future::Future;
use tracing::debug;

const NOTION_VERSION_HEADER: &str = "Notion-Version";

#[derive(Debug, Serialize)]
struct Parent<'a> {
    database_id: &'a str,
}

#[derive(Debug, Serialize)]
struct CreatePageBody<'a> {
    parent: Parent<'a>,
    properties: &'a PageProperties,
}

#[derive(Debug, Serialize)]
struct UpdatePageBody<'a> {
    properties: &'a PageProperties,
}

/// Notion API client
#[derive(Debug, Clone)]
pub struct NotionClient {
    client: Client,
    base_url: String,
    token: String,
    api_version: String,
}

impl NotionClient {
    /// Create a client on top of an existing connection pool
    pub fn with_client(client: Client, config: &NotionConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            api_version: config.api_version.clone(),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(NOTION_VERSION_HEADER, &self.api_version)
    }

    /// `POST /pages/` under the given database, returning the created page
    pub async fn create_page(
        &self,
        database_id: &str,
        properties: &PageProperties,
    ) -> reqwest::Result<NotionPage> {
        let url = format!("{}/pages/", self.base_url);
        debug!(url = %url, properties = properties.len(), "Creating page");

        let body = CreatePageBody {
            parent: Parent { database_id },
            properties,
        };

        self.authorized(self.client.post(&url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<NotionPage>()
            .await
    }

    /// `PATCH /pages/{id}`. The request is built immediately but only sent
    /// when the returned future is polled; the raw response is handed back
    /// without status checks.
    pub fn update_page(
        &self,
        page_id: &str,
        properties: &PageProperties,
    ) -> impl Future<Output = reqwest::Result<Response>> {
        let url = format!("{}/pages/{}", self.base_url, page_id);
        debug!(url = %url, properties = properties.len(), "Updating page");

        self.authorized(self.client.patch(&url))
            .json(&UpdatePageBody { properties })
            .send()
    }
}
