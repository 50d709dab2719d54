// Console report and JSON export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::search::CombinedSearchResults;
use crate::types::{AppResult, BookCollection};

const SEPARATOR: &str = "**************************************************";

/// Print each source's raw records as indented JSON under a banner.
pub fn print_report<W: Write>(results: &CombinedSearchResults, out: &mut W) -> AppResult<()> {
    for source in &results.sources {
        writeln!(out, "{SEPARATOR}")?;
        writeln!(out, "{}\n\n", source.source)?;
        for record in &source.records {
            writeln!(out, "{}", serde_json::to_string_pretty(record)?)?;
        }
    }
    writeln!(out, "{SEPARATOR}")?;
    Ok(())
}

/// Write the collection to `path` as pretty JSON, replacing any existing file.
pub fn write_collection(collection: &BookCollection, path: &Path) -> AppResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, collection)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(path = %path.display(), books = collection.books.len(), "Results written");
    Ok(())
}
