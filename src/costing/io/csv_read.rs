use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::costing::error::{ReportError, Result};

/// A CSV table as loaded from disk, before any typing is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// File the table was read from, used when reporting errors.
    pub source: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl RawTable {
    /// Position of the named column, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

/// Reads a CSV file with a header row. The file is closed before returning,
/// including when a record fails to parse.
pub fn read_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(ReportError::InputNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    debug!(source = %path.display(), columns = ?headers, "loaded table headers");

    let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
    debug!(source = %path.display(), row_count = rows.len(), "loaded table rows");

    Ok(RawTable {
        source: path.to_path_buf(),
        headers,
        rows,
    })
}
