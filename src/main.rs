use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use book_search::{
    config::Config,
    output,
    search::{self, CombinedSearch, GoogleBooksClient, WikibooksClient},
    utils::init_logger,
};

/// Search Google Books and Wikibooks and write the results to JSON.
#[derive(Debug, Parser)]
#[command(name = "book-search", version, about)]
struct Cli {
    /// Search string; prompted for on stdin when omitted
    query: Option<String>,

    /// Output file (overrides OUTPUT_PATH)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip printing the raw records
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(path) = cli.output {
        config.output.path = path;
    }
    info!(
        authenticated = config.google_books.api_key.is_some(),
        output = %config.output.path.display(),
        "Configuration loaded"
    );

    let query = match cli.query {
        Some(q) => q,
        None => prompt_query().context("Failed to read search string")?,
    };

    let http = search::http_client(&config.http)?;
    let searcher = CombinedSearch::new()
        .with_source(GoogleBooksClient::new(http.clone(), &config.google_books))
        .with_source(WikibooksClient::new(http, &config.wikibooks));

    let results = searcher.search(&query).await;

    if !cli.quiet {
        let stdout = io::stdout();
        output::print_report(&results, &mut stdout.lock())?;
    }

    output::write_collection(&results.into_collection(), &config.output.path)
        .with_context(|| format!("Failed to write {}", config.output.path.display()))?;

    Ok(())
}

fn prompt_query() -> io::Result<String> {
    print!("Enter search string: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
