//! Wikibooks client
//!
//! Full-text search through the MediaWiki `list=search` query module.
//! Snippets come back with highlight markup, which is stripped before the
//! records leave this client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use super::{get_json, normalize_records, BookSource, SearchError};
use crate::config::WikibooksConfig;
use crate::types::{NormalizedBook, RawBookRecord};

const SOURCE_NAME: &str = "Wiki Books API";

const HIGHLIGHT_OPEN: &str = r#"<span class="searchmatch">"#;
const HIGHLIGHT_CLOSE: &str = "</span>";

pub struct WikibooksClient {
    client: Client,
    base_url: String,
    limit: u32,
}

impl WikibooksClient {
    pub fn new(client: Client, config: &WikibooksConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            limit: config.limit,
        }
    }
}

#[async_trait]
impl BookSource for WikibooksClient {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn build_params(&self, query: &str) -> Vec<(&'static str, String)> {
        vec![
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("list", "search".to_string()),
            ("srsearch", query.to_string()),
            ("srlimit", self.limit.to_string()),
        ]
    }

    async fn fetch(&self, query: &str) -> Result<Value, SearchError> {
        info!(query = %query, limit = self.limit, "Searching Wikibooks");
        get_json(&self.client, &self.base_url, &self.build_params(query)).await
    }

    fn extract_books(&self, response: &Value) -> Vec<RawBookRecord> {
        let Some(results) = response
            .get("query")
            .and_then(|q| q.get("search"))
            .and_then(|s| s.as_array())
        else {
            debug!("Wikibooks response has no query.search");
            return Vec::new();
        };

        results
            .iter()
            .filter_map(|r| r.as_object())
            .cloned()
            .map(sanitize)
            .collect()
    }

    fn normalize(&self, records: &[RawBookRecord]) -> Vec<NormalizedBook> {
        normalize_records(records, "snippet")
    }
}

/// Strip search highlight markup from the `snippet` field.
///
/// Removal repeats until no markup is left, so applying this twice is the
/// same as applying it once. Other fields are left alone.
pub fn sanitize(mut record: RawBookRecord) -> RawBookRecord {
    if let Some(Value::String(snippet)) = record.get_mut("snippet") {
        *snippet = strip_highlights(snippet);
    }
    record
}

fn strip_highlights(text: &str) -> String {
    let mut out = text.to_string();
    while out.contains(HIGHLIGHT_OPEN) || out.contains(HIGHLIGHT_CLOSE) {
        out = out.replace(HIGHLIGHT_OPEN, "").replace(HIGHLIGHT_CLOSE, "");
    }
    out
}
