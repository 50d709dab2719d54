//! Search Module
//!
//! Book search across two public APIs:
//! - Google Books (primary) - commercial catalog, volumes endpoint
//! - Wikibooks (secondary) - MediaWiki full-text search
//!
//! Each source implements [`BookSource`]: build params, fetch, extract the
//! raw records, normalize them to [`NormalizedBook`].

pub mod combined;
pub mod google_books;
pub mod wikibooks;

pub use combined::{CombinedSearch, CombinedSearchResults, SourceResults};
pub use google_books::GoogleBooksClient;
pub use wikibooks::WikibooksClient;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::types::{AppResult, NormalizedBook, RawBookRecord};

/// Errors that can occur while fetching from a source
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One external book-search API.
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Label used in banners and logs.
    fn name(&self) -> &str;

    fn build_params(&self, query: &str) -> Vec<(&'static str, String)>;

    async fn fetch(&self, query: &str) -> Result<Value, SearchError>;

    /// Pull raw records out of a response. Missing structure means no records.
    fn extract_books(&self, response: &Value) -> Vec<RawBookRecord>;

    fn normalize(&self, records: &[RawBookRecord]) -> Vec<NormalizedBook>;
}

/// Build the HTTP client shared by every source.
pub fn http_client(config: &HttpConfig) -> AppResult<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

/// GET `url` with `params` and decode the body as JSON.
///
/// A non-success status is logged but the body is still decoded: both APIs
/// answer errors with a JSON object that simply carries no records.
pub(crate) async fn get_json(
    client: &Client,
    url: &str,
    params: &[(&'static str, String)],
) -> Result<Value, SearchError> {
    let response = client.get(url).query(params).send().await?;

    let status = response.status();
    if !status.is_success() {
        warn!(url = %url, status = %status, "Search endpoint returned non-success status");
    }

    let body = response.text().await?;
    debug!(url = %url, bytes = body.len(), "Raw search response received");

    Ok(serde_json::from_str(&body)?)
}

/// Map raw records to normalized books, reading `title` and `content_field`.
pub(crate) fn normalize_records(records: &[RawBookRecord], content_field: &str) -> Vec<NormalizedBook> {
    records
        .iter()
        .map(|record| NormalizedBook::from_record(record, content_field))
        .collect()
}
