//! Catalog endpoint client
//!
//! Fetches the list of books visible to a session from `/Access/Books`.
//! A response is decoded all-or-nothing: one malformed element fails the
//! whole fetch.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiRequest};
use crate::session::Session;
use crate::{AccessError, Result};

/// Path of the catalog endpoint
pub const CATALOG_PATH: &str = "/Access/Books";

/// One book in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Server-assigned id, unique within one fetch
    pub id: i64,
    /// Display title
    pub title: String,
    /// Cover image URL
    #[serde(rename = "img_url")]
    pub image_url: String,
    /// Release date as sent by the server; only used for ordering
    #[serde(rename = "date_released")]
    pub release_date: String,
    /// Document URL
    #[serde(rename = "pdf_url")]
    pub document_url: String,
}

/// Order items ascending by release date, comparing the raw strings
///
/// The comparison is lexicographic, not calendar-aware. The sort is stable,
/// so items sharing a date keep their server order.
pub fn sort_catalog(items: &mut [CatalogItem]) {
    items.sort_by(|a, b| a.release_date.cmp(&b.release_date));
}

/// Something that can list the catalog for a session
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full catalog, sorted by release date
    async fn fetch_catalog(&self, session: &Session) -> Result<Vec<CatalogItem>>;
}

/// Client for the catalog endpoint
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: ApiClient,
}

impl CatalogClient {
    /// Create a catalog client over an HTTP client
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the catalog with the session's bearer token
    ///
    /// # Errors
    ///
    /// - `AccessError::Catalog` - the server answered with a non-2xx status
    /// - `AccessError::Protocol` - the body is not an array of well-formed items
    /// - `AccessError::Transport` - no response was obtained
    pub async fn fetch_catalog(&self, session: &Session) -> Result<Vec<CatalogItem>> {
        let request = ApiRequest::get(CATALOG_PATH).bearer(session.token());
        let response = self.client.send(request).await?;

        if !response.is_success() {
            tracing::warn!(status = response.status, "Catalog request rejected");
            return Err(AccessError::Catalog { status: response.status });
        }

        let mut items: Vec<CatalogItem> = serde_json::from_slice(&response.body)?;
        sort_catalog(&mut items);

        tracing::info!(count = items.len(), "Catalog fetched");
        Ok(items)
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_catalog(&self, session: &Session) -> Result<Vec<CatalogItem>> {
        CatalogClient::fetch_catalog(self, session).await
    }
}
