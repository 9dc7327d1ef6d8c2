use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::ARCHIVE_OPTION_ID;

/// An entry of a selectable list (game titles, download options)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectableItem {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl SelectableItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        SelectableItem {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Game titles offered on the first screen
pub fn default_games() -> Vec<SelectableItem> {
    [("3", "League of Legends"), ("6", "Valorant"), ("28", "CS 2")]
        .into_iter()
        .map(|(id, title)| SelectableItem::new(id, title, format!("ID: {}", id)))
        .collect()
}

/// One scheduled or past series, as shown in the table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub start_time: String,
    pub series_id: String,
    pub tournament_name: String,
    pub team_one_name: String,
    pub team_two_name: String,
}

impl SeriesRow {
    /// Cells in column order
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.start_time,
            &self.series_id,
            &self.tournament_name,
            &self.team_one_name,
            &self.team_two_name,
        ]
    }
}

/// Column titles shared by the table view and the CSV export
pub const SERIES_COLUMNS: [&str; 5] = ["Start Time", "Serie ID", "Tournament", "Team One", "Team Two"];

/// What the file listing reported for a series
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileSummary {
    pub replay_count: u32,
    pub has_archive: bool,
}

impl FileSummary {
    /// Build the download option list: archive first, then one entry per game
    pub fn download_options(&self) -> Vec<SelectableItem> {
        let mut options = Vec::new();
        if self.has_archive {
            options.push(SelectableItem::new(
                ARCHIVE_OPTION_ID,
                "Download Events Archive",
                "Compressed events (.zip)",
            ));
        }
        for game in 1..=self.replay_count {
            options.push(SelectableItem::new(
                game.to_string(),
                format!("Download Game {}", game),
                "Replay file (.rofl)",
            ));
        }
        options
    }
}

/// A confirmed download choice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadOption {
    Archive,
    Replay(u32),
}

impl DownloadOption {
    /// Parse a download option id (archive sentinel or 1-based game index)
    pub fn from_id(id: &str) -> Option<Self> {
        if id == ARCHIVE_OPTION_ID {
            return Some(DownloadOption::Archive);
        }
        id.parse::<u32>().ok().filter(|n| *n > 0).map(DownloadOption::Replay)
    }

    pub fn id(&self) -> String {
        match self {
            DownloadOption::Archive => ARCHIVE_OPTION_ID.to_string(),
            DownloadOption::Replay(game) => game.to_string(),
        }
    }

    /// File name written for this option
    pub fn file_name(&self, series_id: &str) -> String {
        match self {
            DownloadOption::Archive => format!("{}.zip", series_id),
            DownloadOption::Replay(game) => format!("{}-{}.rofl", series_id, game),
        }
    }
}

impl fmt::Display for DownloadOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadOption::Archive => write!(f, "events archive"),
            DownloadOption::Replay(game) => write!(f, "replay for game {}", game),
        }
    }
}
