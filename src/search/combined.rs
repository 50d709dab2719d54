//! Runs a query against every configured source, in priority order.

use tracing::{info, warn};

use super::BookSource;
use crate::types::{BookCollection, NormalizedBook, RawBookRecord};

/// Results from one source.
#[derive(Debug, Clone)]
pub struct SourceResults {
    /// Source label, e.g. "Google Books API"
    pub source: String,
    /// Records as extracted, before normalization
    pub records: Vec<RawBookRecord>,
    /// Normalized books, same order as `records`
    pub books: Vec<NormalizedBook>,
    /// Whether the fetch succeeded
    pub success: bool,
}

/// Combined results, one entry per source in priority order.
#[derive(Debug, Clone, Default)]
pub struct CombinedSearchResults {
    pub sources: Vec<SourceResults>,
    /// Any error messages
    pub errors: Vec<String>,
}

impl CombinedSearchResults {
    pub fn total_books(&self) -> usize {
        self.sources.iter().map(|s| s.books.len()).sum()
    }

    /// Concatenate every source's books, earlier sources first.
    pub fn into_collection(self) -> BookCollection {
        BookCollection {
            books: self.sources.into_iter().flat_map(|s| s.books).collect(),
        }
    }
}

pub struct CombinedSearch {
    sources: Vec<Box<dyn BookSource>>,
}

impl CombinedSearch {
    pub fn new() -> Self {
        Self { sources: Vec::new() }
    }

    /// Append a source; sources added first rank first in the output.
    pub fn with_source(mut self, source: impl BookSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Query each source one after another.
    ///
    /// A failed fetch is logged and recorded in `errors`; that source then
    /// contributes no records and the remaining sources still run.
    pub async fn search(&self, query: &str) -> CombinedSearchResults {
        let mut combined = CombinedSearchResults::default();

        for source in &self.sources {
            let (records, success) = match source.fetch(query).await {
                Ok(response) => (source.extract_books(&response), true),
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Search failed");
                    combined.errors.push(format!("{}: {}", source.name(), e));
                    (Vec::new(), false)
                }
            };
            let books = source.normalize(&records);
            info!(source = source.name(), count = books.len(), "Search completed");

            combined.sources.push(SourceResults {
                source: source.name().to_string(),
                records,
                books,
                success,
            });
        }

        combined
    }
}

impl Default for CombinedSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{normalize_records, SearchError};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    /// Source that answers every query with a canned response.
    struct StaticSource {
        name: &'static str,
        response: Option<Value>,
    }

    #[async_trait]
    impl BookSource for StaticSource {
        fn name(&self) -> &str {
            self.name
        }

        fn build_params(&self, query: &str) -> Vec<(&'static str, String)> {
            vec![("q", query.to_string())]
        }

        async fn fetch(&self, _query: &str) -> Result<Value, SearchError> {
            match &self.response {
                Some(v) => Ok(v.clone()),
                None => Err(serde_json::from_str::<Value>("{").unwrap_err().into()),
            }
        }

        fn extract_books(&self, response: &Value) -> Vec<RawBookRecord> {
            response
                .get("results")
                .and_then(|r| r.as_array())
                .map(|arr| arr.iter().filter_map(|r| r.as_object()).cloned().collect())
                .unwrap_or_default()
        }

        fn normalize(&self, records: &[RawBookRecord]) -> Vec<NormalizedBook> {
            normalize_records(records, "text")
        }
    }

    fn titles(n: usize, prefix: &str) -> Value {
        let results: Vec<Value> = (0..n)
            .map(|i| json!({"title": format!("{prefix}{i}"), "text": "body"}))
            .collect();
        json!({ "results": results })
    }

    #[tokio::test]
    async fn test_concatenates_in_source_order() {
        let search = CombinedSearch::new()
            .with_source(StaticSource { name: "a", response: Some(titles(2, "a")) })
            .with_source(StaticSource { name: "b", response: Some(titles(3, "b")) });

        let results = search.search("q").await;
        assert_eq!(results.total_books(), 5);
        assert!(results.errors.is_empty());

        let collection = results.into_collection();
        let got: Vec<&str> = collection.books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(got, vec!["a0", "a1", "b0", "b1", "b2"]);
    }

    #[tokio::test]
    async fn test_failed_source_degrades_to_empty() {
        let search = CombinedSearch::new()
            .with_source(StaticSource { name: "broken", response: None })
            .with_source(StaticSource { name: "b", response: Some(titles(1, "b")) });

        let results = search.search("q").await;
        assert_eq!(results.sources.len(), 2);
        assert!(!results.sources[0].success);
        assert!(results.sources[0].records.is_empty());
        assert!(results.sources[1].success);
        assert_eq!(results.errors.len(), 1);
        assert!(results.errors[0].starts_with("broken:"));
        assert_eq!(results.into_collection().books.len(), 1);
    }

    #[tokio::test]
    async fn test_keeps_raw_records() {
        let search = CombinedSearch::new().with_source(StaticSource {
            name: "a",
            response: Some(json!({"results": [{"title": "Dune", "year": 1965}]})),
        });

        let results = search.search("dune").await;
        assert_eq!(results.sources[0].records[0]["year"], 1965);
        assert_eq!(results.sources[0].books, vec![NormalizedBook::new("Dune", "")]);
    }

    #[tokio::test]
    async fn test_no_sources() {
        let results = CombinedSearch::default().search("q").await;
        assert!(results.sources.is_empty());
        assert!(results.into_collection().books.is_empty());
    }
}
