//! CSV export of the series table

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{SeriesRow, SERIES_COLUMNS};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Error creating file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Append `.csv` unless the path already ends with it
pub fn ensure_csv_extension(path: PathBuf) -> PathBuf {
    let has_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if has_csv {
        return path;
    }
    let mut name: OsString = path.into_os_string();
    name.push(".csv");
    PathBuf::from(name)
}

/// Render rows as CSV: one header record, then one record per row in the given order
pub fn to_csv(rows: &[SeriesRow]) -> String {
    let mut csv = String::new();
    push_record(&mut csv, &SERIES_COLUMNS);
    for row in rows {
        push_record(&mut csv, &row.cells());
    }
    csv
}

/// Write rows to `path` as CSV
pub fn export(rows: &[SeriesRow], path: &Path) -> Result<(), ExportError> {
    fs::write(path, to_csv(rows)).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), rows = rows.len(), "Exported series");
    Ok(())
}

fn push_record(csv: &mut String, fields: &[&str]) {
    let record: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
    csv.push_str(&record.join(","));
    csv.push('\n');
}

fn escape_field(field: &str) -> String {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
