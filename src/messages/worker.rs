//! Worker messages - communication between App and Worker layers

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::models::{DownloadOption, FileSummary, SeriesRow};

/// Commands sent from App layer to Worker layer
#[derive(Debug, Clone)]
pub enum WorkerCommand {
    /// Search series of one title scheduled within `[start_time, end_time]`
    Search {
        id: u64,
        title_id: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    },
    /// List downloadable files of a series
    ListFiles {
        id: u64,
        series_id: String,
    },
    /// Download the chosen file into `directory`
    Download {
        id: u64,
        series_id: String,
        option: DownloadOption,
        directory: PathBuf,
    },
    /// Write the rows as CSV to `path` (`.csv` appended when missing)
    Export {
        id: u64,
        rows: Vec<SeriesRow>,
        path: PathBuf,
    },
    /// Shutdown the worker actor
    Shutdown,
}

/// Responses sent from Worker layer to App layer
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    /// Raw search result, not yet validated
    SearchResults {
        id: u64,
        raw: serde_json::Value,
    },
    FileList {
        id: u64,
        summary: FileSummary,
    },
    DownloadComplete {
        id: u64,
        path: PathBuf,
    },
    Exported {
        id: u64,
        path: PathBuf,
        rows: usize,
    },
    Error {
        id: u64,
        message: String,
    },
}

impl WorkerResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            WorkerResponse::SearchResults { id, .. } => *id,
            WorkerResponse::FileList { id, .. } => *id,
            WorkerResponse::DownloadComplete { id, .. } => *id,
            WorkerResponse::Exported { id, .. } => *id,
            WorkerResponse::Error { id, .. } => *id,
        }
    }
}
