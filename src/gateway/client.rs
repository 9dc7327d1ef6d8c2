//! HTTP client for the GRID data service

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use serde::Deserialize;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use crate::config::Config;
use crate::constants::{API_KEY_HEADER, ARCHIVE_MANIFEST_ID, REPLAY_EXTENSION};
use crate::gateway::query::search_request;
use crate::models::{DownloadOption, FileSummary};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{}", describe_request_error(.0))]
    Request(#[from] reqwest::Error),
    #[error("Unexpected status code {0}")]
    Status(u16),
    #[error("Directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("Error saving {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_request_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timed out".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_decode() {
        format!("Error decoding response: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// Body of the file listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<RemoteFile>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    pub id: String,
    #[serde(default)]
    pub file_name: String,
}

/// Count replay files and look for the events archive entry
pub fn summarize_files(list: &FileList) -> FileSummary {
    list.files.iter().fold(FileSummary::default(), |mut summary, file| {
        if file.id == ARCHIVE_MANIFEST_ID {
            summary.has_archive = true;
        }
        let is_replay = Path::new(&file.file_name)
            .extension()
            .map(|ext| ext == REPLAY_EXTENSION)
            .unwrap_or(false);
        if is_replay {
            summary.replay_count += 1;
        }
        summary
    })
}

/// Client bound to one configuration (base URL + API key)
#[derive(Clone)]
pub struct GridClient {
    http: reqwest::Client,
    config: Config,
}

impl GridClient {
    pub fn new(config: Config) -> Self {
        GridClient {
            http: create_client(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.url(path))
            .header(API_KEY_HEADER, &self.config.api_key)
    }

    /// Run the series search and return the raw result
    pub async fn search(
        &self,
        title_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<serde_json::Value, GatewayError> {
        let body = search_request(title_id, start, end);
        let response = self
            .http
            .post(self.url("/central-data/graphql"))
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(Duration::from_secs(30))
            .json(&body)
            .send()
            .await?;
        // GraphQL errors come back as JSON bodies, so the status is not checked here
        Ok(response.json::<serde_json::Value>().await?)
    }

    /// List downloadable files of a series
    pub async fn list_files(&self, series_id: &str) -> Result<FileSummary, GatewayError> {
        let response = self
            .get(&format!("/file-download/list/{}", series_id))
            .timeout(Duration::from_secs(30))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }
        let list = response.json::<FileList>().await?;
        Ok(summarize_files(&list))
    }

    /// Download `<series_id>.zip` into `directory`
    pub async fn download_archive(&self, series_id: &str, directory: &Path) -> Result<PathBuf, GatewayError> {
        self.download(series_id, DownloadOption::Archive, directory).await
    }

    /// Download `<series_id>-<game>.rofl` into `directory`
    pub async fn download_replay(
        &self,
        series_id: &str,
        game: u32,
        directory: &Path,
    ) -> Result<PathBuf, GatewayError> {
        self.download(series_id, DownloadOption::Replay(game), directory).await
    }

    pub async fn download(
        &self,
        series_id: &str,
        option: DownloadOption,
        directory: &Path,
    ) -> Result<PathBuf, GatewayError> {
        if !directory.is_dir() {
            return Err(GatewayError::MissingDirectory(directory.to_path_buf()));
        }

        let path = match option {
            DownloadOption::Archive => format!("/file-download/events/grid/series/{}", series_id),
            DownloadOption::Replay(game) => {
                format!("/file-download/replay/riot/series/{}/games/{}", series_id, game)
            }
        };
        let response = self.get(&path).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let target = directory.join(option.file_name(series_id));
        if let Err(e) = write_body(response, &target).await {
            let _ = tokio::fs::remove_file(&target).await;
            return Err(e);
        }
        Ok(target)
    }
}

async fn write_body(response: reqwest::Response, target: &Path) -> Result<(), GatewayError> {
    let io_error = |source: std::io::Error| GatewayError::Io {
        path: target.to_path_buf(),
        source,
    };

    let mut file = tokio::fs::File::create(target).await.map_err(io_error)?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        file.write_all(&bytes).await.map_err(io_error)?;
    }
    file.flush().await.map_err(io_error)?;
    Ok(())
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
