//! App state - pure data structure with no I/O logic

use crate::messages::{PickRequest, RenderState, View};
use crate::models::{DownloadOption, SelectableItem, SeriesRow};

pub const START_DAYS_PROMPT: &str = "Enter the number of past days to include (e.g., 10): ";
pub const END_DAYS_PROMPT: &str = "Enter the number of future days to include (e.g., 1): ";
pub const SEARCH_LOADING_LABEL: &str = "Loading data, please wait...";
pub const LIST_FILES_LOADING_LABEL: &str = "Fetching file list...";
pub const DOWNLOAD_LOADING_LABEL: &str = "Downloading data, please wait...";

/// Digits typed for a day count
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DayInput(String);

impl DayInput {
    /// Append a digit; anything else is ignored
    pub fn push(&mut self, c: char) -> bool {
        if c.is_ascii_digit() {
            self.0.push(c);
            true
        } else {
            false
        }
    }

    pub fn backspace(&mut self) {
        self.0.pop();
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parsed day count; empty input counts as 0, too many days saturates
    pub fn days(&self) -> u32 {
        if self.0.is_empty() {
            return 0;
        }
        self.0.parse().unwrap_or(u32::MAX)
    }
}

/// Sub-state of the series table
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableMode {
    /// Waiting for the series search
    Loading { request_id: u64 },
    Loaded,
    /// Waiting for the file listing of the confirmed row
    ListingFiles { request_id: u64, series_id: String },
}

/// Current screen, carrying only the data that screen needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    SelectGame,
    EnterStartDays {
        input: DayInput,
    },
    EnterEndDays {
        start: DayInput,
        input: DayInput,
    },
    Table(TableMode),
    SelectDownloadOption {
        series_id: String,
        options: Vec<SelectableItem>,
        selected: usize,
    },
    Downloading {
        request_id: u64,
        series_id: String,
        option: DownloadOption,
    },
}

impl Screen {
    /// Request whose result this screen is waiting for
    pub fn pending_request(&self) -> Option<u64> {
        match self {
            Screen::Table(TableMode::Loading { request_id })
            | Screen::Table(TableMode::ListingFiles { request_id, .. })
            | Screen::Downloading { request_id, .. } => Some(*request_id),
            _ => None,
        }
    }

    /// Input other than quit is ignored while loading
    pub fn is_loading(&self) -> bool {
        self.pending_request().is_some()
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Game list
    pub games: Vec<SelectableItem>,
    pub selected_game: usize,
    pub selected_title_id: Option<String>,

    pub screen: Screen,

    // Series table
    pub rows: Vec<SeriesRow>,
    pub selected_row: usize,
    pub selected_series_id: Option<String>,
    pub download_option: Option<DownloadOption>,

    // Messages
    pub error_message: Option<String>,
    pub status_message: Option<String>,

    // Request tracking
    pub next_request_id: u64,
    pub pending_export: Option<u64>,
    /// Destination dialog the UI thread has to answer
    pub pending_pick: Option<PickRequest>,
}

impl AppState {
    pub fn new(games: Vec<SelectableItem>) -> Self {
        AppState {
            games,
            selected_game: 0,
            selected_title_id: None,
            screen: Screen::SelectGame,
            rows: Vec::new(),
            selected_row: 0,
            selected_series_id: None,
            download_option: None,
            error_message: None,
            status_message: None,
            next_request_id: 1,
            pending_export: None,
            pending_pick: None,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_loading(&self) -> bool {
        self.screen.is_loading()
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let view = match &self.screen {
            Screen::SelectGame => View::SelectGame {
                items: self.games.clone(),
                selected: self.selected_game,
            },
            Screen::EnterStartDays { input } => View::DayPrompt {
                prompt: START_DAYS_PROMPT,
                input: input.as_str().to_string(),
            },
            Screen::EnterEndDays { input, .. } => View::DayPrompt {
                prompt: END_DAYS_PROMPT,
                input: input.as_str().to_string(),
            },
            Screen::Table(TableMode::Loading { .. }) => View::Loading {
                label: SEARCH_LOADING_LABEL,
            },
            Screen::Table(TableMode::ListingFiles { .. }) => View::Loading {
                label: LIST_FILES_LOADING_LABEL,
            },
            Screen::Table(TableMode::Loaded) => View::Table {
                rows: self.rows.clone(),
                selected: self.selected_row,
            },
            Screen::SelectDownloadOption { options, selected, .. } => View::SelectDownloadOption {
                options: options.clone(),
                selected: *selected,
            },
            Screen::Downloading { .. } => View::Loading {
                label: DOWNLOAD_LOADING_LABEL,
            },
        };

        RenderState {
            view,
            error_message: self.error_message.clone(),
            status_message: self.status_message.clone(),
            pick: self.pending_pick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_games;

    #[test]
    fn test_day_input_digits_and_backspace() {
        let mut input = DayInput::default();
        for c in "1a0-5".chars() {
            input.push(c);
        }
        assert_eq!(input.as_str(), "105");
        input.backspace();
        assert_eq!(input.as_str(), "10");
        input.backspace();
        input.backspace();
        input.backspace();
        assert_eq!(input.as_str(), "");
        assert!(input.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_day_input_parsing_never_fails_and_saturates() {
        assert_eq!(DayInput::default().days(), 0);
        let mut input = DayInput::default();
        "12".chars().for_each(|c| {
            input.push(c);
        });
        assert_eq!(input.days(), 12);
        let mut huge = DayInput::default();
        "99999999999".chars().for_each(|c| {
            huge.push(c);
        });
        assert_eq!(huge.days(), u32::MAX);
    }

    #[test]
    fn test_loading_is_derived_from_screen() {
        assert!(!Screen::SelectGame.is_loading());
        assert!(!Screen::Table(TableMode::Loaded).is_loading());
        assert!(Screen::Table(TableMode::Loading { request_id: 1 }).is_loading());
        assert_eq!(
            Screen::Downloading {
                request_id: 4,
                series_id: "1".into(),
                option: DownloadOption::Archive
            }
            .pending_request(),
            Some(4)
        );
    }

    #[test]
    fn test_initial_render_state() {
        let state = AppState::new(default_games());
        let render = state.to_render_state();
        match render.view {
            View::SelectGame { items, selected } => {
                assert_eq!(items.len(), 3);
                assert_eq!(selected, 0);
            }
            other => panic!("unexpected view {:?}", other),
        }
        assert!(render.error_message.is_none());
    }
}
