//! Google Books client
//!
//! Queries the public volumes endpoint and keeps the `volumeInfo` object of
//! each returned item.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use super::{get_json, normalize_records, BookSource, SearchError};
use crate::config::GoogleBooksConfig;
use crate::types::{NormalizedBook, RawBookRecord};

const SOURCE_NAME: &str = "Google Books API";

pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksClient {
    pub fn new(client: Client, config: &GoogleBooksConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl BookSource for GoogleBooksClient {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn build_params(&self, query: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.to_string()),
            ("printType", "books".to_string()),
            ("projection", "lite".to_string()),
            ("+", "intitle".to_string()),
        ];
        // Anonymous requests are allowed, just more tightly quota'd.
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }
        params
    }

    async fn fetch(&self, query: &str) -> Result<Value, SearchError> {
        info!(query = %query, authenticated = self.api_key.is_some(), "Searching Google Books");
        get_json(&self.client, &self.base_url, &self.build_params(query)).await
    }

    fn extract_books(&self, response: &Value) -> Vec<RawBookRecord> {
        let Some(items) = response.get("items").and_then(|v| v.as_array()) else {
            debug!("Google Books response has no items");
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| item.get("volumeInfo").and_then(|v| v.as_object()))
            .cloned()
            .collect()
    }

    fn normalize(&self, records: &[RawBookRecord]) -> Vec<NormalizedBook> {
        normalize_records(records, "description")
    }
}
