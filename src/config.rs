use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";
pub const DEFAULT_WIKIBOOKS_URL: &str = "https://en.wikibooks.org/w/api.php";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub google_books: GoogleBooksConfig,
    pub wikibooks: WikibooksConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleBooksConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikibooksConfig {
    pub base_url: String,
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Config {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let api_key = lookup("API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let require_api_key: bool = var("REQUIRE_API_KEY", "false").parse()?;
        if require_api_key && api_key.is_none() {
            anyhow::bail!("API_KEY must be set when REQUIRE_API_KEY=true");
        }

        Ok(Self {
            google_books: GoogleBooksConfig {
                base_url: var("GOOGLE_BOOKS_URL", DEFAULT_GOOGLE_BOOKS_URL),
                api_key,
            },
            wikibooks: WikibooksConfig {
                base_url: var("WIKIBOOKS_URL", DEFAULT_WIKIBOOKS_URL),
                limit: var("WIKIBOOKS_LIMIT", "50").parse()?,
            },
            http: HttpConfig {
                timeout_secs: var("HTTP_TIMEOUT_SECS", "30").parse()?,
                user_agent: var(
                    "HTTP_USER_AGENT",
                    concat!("book-search/", env!("CARGO_PKG_VERSION")),
                ),
            },
            output: OutputConfig {
                path: PathBuf::from(var("OUTPUT_PATH", "output.json")),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]).unwrap();
        assert_eq!(config.google_books.base_url, DEFAULT_GOOGLE_BOOKS_URL);
        assert_eq!(config.google_books.api_key, None);
        assert_eq!(config.wikibooks.base_url, DEFAULT_WIKIBOOKS_URL);
        assert_eq!(config.wikibooks.limit, 50);
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.user_agent.starts_with("book-search/"));
        assert_eq!(config.output.path, PathBuf::from("output.json"));
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let config = config_with(&[("API_KEY", "   ")]).unwrap();
        assert_eq!(config.google_books.api_key, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("API_KEY", "abc123"),
            ("WIKIBOOKS_LIMIT", "10"),
            ("OUTPUT_PATH", "/tmp/books.json"),
        ])
        .unwrap();
        assert_eq!(config.google_books.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.wikibooks.limit, 10);
        assert_eq!(config.output.path, PathBuf::from("/tmp/books.json"));
    }

    #[test]
    fn test_required_key_missing_fails() {
        let err = config_with(&[("REQUIRE_API_KEY", "true")]).unwrap_err();
        assert!(err.to_string().contains("API_KEY"));
        assert!(config_with(&[("REQUIRE_API_KEY", "true"), ("API_KEY", "k")]).is_ok());
    }

    #[test]
    fn test_invalid_number_fails() {
        assert!(config_with(&[("HTTP_TIMEOUT_SECS", "soon")]).is_err());
    }
}
