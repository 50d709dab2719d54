// Book Search - query Google Books and Wikibooks, export normalized results

pub mod config;
pub mod output;
pub mod search;    // Source clients and the combined search driver
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use types::{AppError, AppResult, BookCollection, NormalizedBook, RawBookRecord};
