// Shared data types and errors

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record exactly as a remote API returned it.
pub type RawBookRecord = Map<String, Value>;

/// The common shape every source is reduced to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedBook {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Content")]
    pub content: String,
}

impl NormalizedBook {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Build from a raw record, reading `title` and the given content field.
    /// Absent or non-string fields become empty strings.
    pub fn from_record(record: &RawBookRecord, content_field: &str) -> Self {
        Self {
            title: string_field(record, "title"),
            content: string_field(record, content_field),
        }
    }
}

fn string_field(record: &RawBookRecord, key: &str) -> String {
    record
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// The persisted result set: `{"books": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCollection {
    pub books: Vec<NormalizedBook>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
