//! Worker actor - runs API calls and file writes in Tokio async runtime
//!
//! Destinations are chosen on the UI thread; commands arrive with them.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::export;
use crate::gateway::GridClient;
use crate::messages::{WorkerCommand, WorkerResponse};
use crate::models::{DownloadOption, SeriesRow};

/// Worker actor that processes commands from the app layer
pub struct WorkerActor {
    client: GridClient,
    response_tx: mpsc::UnboundedSender<WorkerResponse>,
    active_tasks: JoinSet<()>,
}

impl WorkerActor {
    pub fn new(client: GridClient, response_tx: mpsc::UnboundedSender<WorkerResponse>) -> Self {
        WorkerActor {
            client,
            response_tx,
            active_tasks: JoinSet::new(),
        }
    }

    /// Run the worker actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<WorkerCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(WorkerCommand::Search { id, title_id, start_time, end_time }) => {
                            let client = self.client.clone();
                            let response_tx = self.response_tx.clone();
                            self.active_tasks.spawn(async move {
                                let _ = response_tx.send(search(&client, id, &title_id, start_time, end_time).await);
                            });
                        }

                        Some(WorkerCommand::ListFiles { id, series_id }) => {
                            let client = self.client.clone();
                            let response_tx = self.response_tx.clone();
                            self.active_tasks.spawn(async move {
                                let _ = response_tx.send(list_files(&client, id, &series_id).await);
                            });
                        }

                        Some(WorkerCommand::Download { id, series_id, option, directory }) => {
                            let client = self.client.clone();
                            let response_tx = self.response_tx.clone();
                            self.active_tasks.spawn(async move {
                                let _ = response_tx.send(download(&client, id, &series_id, option, directory).await);
                            });
                        }

                        Some(WorkerCommand::Export { id, rows, path }) => {
                            let response_tx = self.response_tx.clone();
                            self.active_tasks.spawn(async move {
                                let _ = response_tx.send(export_rows(id, rows, path).await);
                            });
                        }

                        Some(WorkerCommand::Shutdown) | None => {
                            self.active_tasks.abort_all();
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_tasks.join_next() => {}
            }
        }

        tracing::info!("Worker actor stopped");
    }
}

async fn search(
    client: &GridClient,
    id: u64,
    title_id: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> WorkerResponse {
    tracing::info!(id, title_id, %start_time, %end_time, "Searching series");
    match client.search(title_id, start_time, end_time).await {
        Ok(raw) => WorkerResponse::SearchResults { id, raw },
        Err(e) => {
            tracing::error!(id, error = %e, "Series search failed");
            WorkerResponse::Error {
                id,
                message: format!("Error fetching series: {}", e),
            }
        }
    }
}

async fn list_files(client: &GridClient, id: u64, series_id: &str) -> WorkerResponse {
    tracing::info!(id, series_id, "Listing files");
    match client.list_files(series_id).await {
        Ok(summary) => WorkerResponse::FileList { id, summary },
        Err(e) => {
            tracing::error!(id, series_id, error = %e, "File listing failed");
            WorkerResponse::Error {
                id,
                message: format!("Error fetching game list: {}", e),
            }
        }
    }
}

async fn download(
    client: &GridClient,
    id: u64,
    series_id: &str,
    option: DownloadOption,
    directory: PathBuf,
) -> WorkerResponse {
    tracing::info!(id, series_id, %option, directory = %directory.display(), "Downloading");
    let result = match option {
        DownloadOption::Archive => client.download_archive(series_id, &directory).await,
        DownloadOption::Replay(game) => client.download_replay(series_id, game, &directory).await,
    };
    match result {
        Ok(path) => {
            tracing::info!(id, path = %path.display(), "Download complete");
            WorkerResponse::DownloadComplete { id, path }
        }
        Err(e) => {
            tracing::error!(id, series_id, error = %e, "Download failed");
            WorkerResponse::Error {
                id,
                message: format!("Error downloading {}: {}", option, e),
            }
        }
    }
}

async fn export_rows(id: u64, rows: Vec<SeriesRow>, path: PathBuf) -> WorkerResponse {
    let count = rows.len();
    let path = export::ensure_csv_extension(path);
    let target = path.clone();
    let result = tokio::task::spawn_blocking(move || export::export(&rows, &target)).await;

    match result {
        Ok(Ok(())) => WorkerResponse::Exported { id, path, rows: count },
        Ok(Err(e)) => {
            tracing::error!(id, error = %e, "Export failed");
            WorkerResponse::Error {
                id,
                message: e.to_string(),
            }
        }
        Err(e) => WorkerResponse::Error {
            id,
            message: format!("Error exporting: {}", e),
        },
    }
}
