//! Command handlers - business logic for processing UI events and worker responses

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};

use crate::app::state::{DayInput, Screen, TableMode};
use crate::app::AppState;
use crate::messages::{PickKind, PickRequest, UiEvent, WorkerCommand, WorkerResponse};
use crate::models::DownloadOption;
use crate::transform::series_rows;

/// Search window of `[now - start_days, now + end_days]`, clamped to the representable range
pub fn search_window(now: DateTime<Utc>, start_days: u32, end_days: u32) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now
        .checked_sub_signed(Duration::days(i64::from(start_days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let end = now
        .checked_add_signed(Duration::days(i64::from(end_days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (start, end)
}

impl AppState {
    // ========================
    // Event dispatch
    // ========================

    /// Apply a UI event; returns the worker command it triggers, if any.
    ///
    /// Quit is handled by the actor and never reaches here.
    pub fn handle_event(&mut self, event: UiEvent, now: DateTime<Utc>) -> Option<WorkerCommand> {
        // Dialog answers are not keystrokes and arrive while loading
        if let UiEvent::Picked { id, path } = event {
            return self.handle_pick(id, path);
        }

        if self.is_loading() {
            return None;
        }

        // While an error is shown, the next key only dismisses it
        if self.error_message.take().is_some() {
            return None;
        }
        self.status_message = None;

        match event {
            UiEvent::Up => {
                self.select_prev();
                None
            }
            UiEvent::Down => {
                self.select_next();
                None
            }
            UiEvent::Digit(c) => {
                self.enter_digit(c);
                None
            }
            UiEvent::Backspace => {
                self.delete_digit();
                None
            }
            UiEvent::Back => {
                self.go_back();
                None
            }
            UiEvent::Confirm => self.confirm(now),
            UiEvent::Export => {
                self.export_rows();
                None
            }
            UiEvent::Picked { .. } | UiEvent::Quit => None,
        }
    }

    // ========================
    // Navigation
    // ========================

    pub fn select_prev(&mut self) {
        match &mut self.screen {
            Screen::SelectGame => {
                self.selected_game = self.selected_game.saturating_sub(1);
            }
            Screen::Table(TableMode::Loaded) => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            Screen::SelectDownloadOption { selected, .. } => {
                *selected = selected.saturating_sub(1);
            }
            _ => {}
        }
    }

    pub fn select_next(&mut self) {
        match &mut self.screen {
            Screen::SelectGame => {
                if self.selected_game + 1 < self.games.len() {
                    self.selected_game += 1;
                }
            }
            Screen::Table(TableMode::Loaded) => {
                if self.selected_row + 1 < self.rows.len() {
                    self.selected_row += 1;
                }
            }
            Screen::SelectDownloadOption { options, selected, .. } => {
                if *selected + 1 < options.len() {
                    *selected += 1;
                }
            }
            _ => {}
        }
    }

    /// Leave the download option list without choosing
    pub fn go_back(&mut self) {
        if let Screen::SelectDownloadOption { .. } = self.screen {
            self.screen = Screen::Table(TableMode::Loaded);
        }
    }

    // ========================
    // Day entry
    // ========================

    fn day_input_mut(&mut self) -> Option<&mut DayInput> {
        match &mut self.screen {
            Screen::EnterStartDays { input } | Screen::EnterEndDays { input, .. } => Some(input),
            _ => None,
        }
    }

    pub fn enter_digit(&mut self, c: char) {
        if let Some(input) = self.day_input_mut() {
            input.push(c);
        }
    }

    pub fn delete_digit(&mut self) {
        if let Some(input) = self.day_input_mut() {
            input.backspace();
        }
    }

    // ========================
    // Confirmation
    // ========================

    /// Enter on the current screen
    pub fn confirm(&mut self, now: DateTime<Utc>) -> Option<WorkerCommand> {
        match std::mem::replace(&mut self.screen, Screen::SelectGame) {
            Screen::SelectGame => {
                if let Some(game) = self.games.get(self.selected_game) {
                    self.selected_title_id = Some(game.id.clone());
                    self.screen = Screen::EnterStartDays {
                        input: DayInput::default(),
                    };
                }
                None
            }
            Screen::EnterStartDays { input } => {
                self.screen = Screen::EnterEndDays {
                    start: input,
                    input: DayInput::default(),
                };
                None
            }
            Screen::EnterEndDays { start, input } => self.start_search(start.days(), input.days(), now),
            Screen::Table(TableMode::Loaded) => self.list_files(),
            Screen::SelectDownloadOption {
                series_id,
                options,
                selected,
            } => {
                let option = options
                    .get(selected)
                    .and_then(|item| DownloadOption::from_id(&item.id))
                    .filter(|_| self.pending_pick.is_none());
                match option {
                    Some(option) => {
                        self.start_download(series_id, option);
                        None
                    }
                    None => {
                        // Empty list or another dialog open: stay put
                        self.screen = Screen::SelectDownloadOption {
                            series_id,
                            options,
                            selected,
                        };
                        None
                    }
                }
            }
            other => {
                self.screen = other;
                None
            }
        }
    }

    fn start_search(&mut self, start_days: u32, end_days: u32, now: DateTime<Utc>) -> Option<WorkerCommand> {
        let Some(title_id) = self.selected_title_id.clone() else {
            self.screen = Screen::SelectGame;
            return None;
        };

        let (start_time, end_time) = search_window(now, start_days, end_days);
        let id = self.next_id();
        self.screen = Screen::Table(TableMode::Loading { request_id: id });

        Some(WorkerCommand::Search {
            id,
            title_id,
            start_time,
            end_time,
        })
    }

    fn list_files(&mut self) -> Option<WorkerCommand> {
        let Some(row) = self.rows.get(self.selected_row) else {
            self.screen = Screen::Table(TableMode::Loaded);
            return None;
        };

        let series_id = row.series_id.clone();
        let id = self.next_id();
        self.selected_series_id = Some(series_id.clone());
        self.screen = Screen::Table(TableMode::ListingFiles {
            request_id: id,
            series_id: series_id.clone(),
        });

        Some(WorkerCommand::ListFiles { id, series_id })
    }

    /// Enter the download screen and ask the UI for a directory
    fn start_download(&mut self, series_id: String, option: DownloadOption) {
        let id = self.next_id();
        self.download_option = Some(option);
        self.screen = Screen::Downloading {
            request_id: id,
            series_id,
            option,
        };
        self.pending_pick = Some(PickRequest {
            id,
            kind: PickKind::DownloadDirectory,
        });
    }

    // ========================
    // Export
    // ========================

    /// Ask the UI for an export path; one export runs at a time
    pub fn export_rows(&mut self) {
        if self.screen != Screen::Table(TableMode::Loaded)
            || self.pending_export.is_some()
            || self.pending_pick.is_some()
        {
            return;
        }

        let id = self.next_id();
        self.pending_export = Some(id);
        self.pending_pick = Some(PickRequest {
            id,
            kind: PickKind::ExportFile,
        });
    }

    // ========================
    // Destination dialogs
    // ========================

    /// Apply the UI's answer to the open destination dialog
    pub fn handle_pick(&mut self, id: u64, path: Option<PathBuf>) -> Option<WorkerCommand> {
        let Some(request) = self.pending_pick.filter(|request| request.id == id) else {
            tracing::warn!(id, "Discarding stale destination");
            return None;
        };
        self.pending_pick = None;

        match (request.kind, path) {
            (PickKind::ExportFile, None) => {
                tracing::info!(id, "Export cancelled");
                self.pending_export = None;
                None
            }
            (PickKind::ExportFile, Some(path)) => Some(WorkerCommand::Export {
                id,
                rows: self.rows.clone(),
                path,
            }),
            (PickKind::DownloadDirectory, None) => {
                tracing::info!(id, "Download cancelled");
                if self.screen.pending_request() == Some(id) {
                    self.screen = Screen::Table(TableMode::Loaded);
                }
                None
            }
            (PickKind::DownloadDirectory, Some(directory)) => match &self.screen {
                Screen::Downloading {
                    request_id,
                    series_id,
                    option,
                } if *request_id == id => Some(WorkerCommand::Download {
                    id,
                    series_id: series_id.clone(),
                    option: *option,
                    directory,
                }),
                _ => None,
            },
        }
    }

    // ========================
    // Worker responses
    // ========================

    pub fn handle_response(&mut self, response: WorkerResponse) {
        let response_id = response.id();

        if self.pending_export == Some(response_id) {
            self.finish_export(response);
            return;
        }

        if self.screen.pending_request() != Some(response_id) {
            tracing::warn!(id = response_id, "Discarding stale worker response");
            return;
        }

        match (std::mem::replace(&mut self.screen, Screen::Table(TableMode::Loaded)), response) {
            (Screen::Table(TableMode::Loading { .. }), WorkerResponse::SearchResults { raw, .. }) => {
                match series_rows(&raw) {
                    Ok(rows) => {
                        tracing::info!(rows = rows.len(), "Series loaded");
                        self.rows = rows;
                        self.selected_row = 0;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Search result rejected");
                        self.error_message = Some(e.to_string());
                    }
                }
            }
            (Screen::Table(TableMode::ListingFiles { series_id, .. }), WorkerResponse::FileList { summary, .. }) => {
                self.screen = Screen::SelectDownloadOption {
                    series_id,
                    options: summary.download_options(),
                    selected: 0,
                };
            }
            (Screen::Downloading { .. }, WorkerResponse::DownloadComplete { path, .. }) => {
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            (_, WorkerResponse::Error { message, .. }) => {
                self.error_message = Some(message);
            }
            (screen, response) => {
                tracing::warn!(?response, "Unexpected worker response");
                self.screen = screen;
            }
        }
    }

    fn finish_export(&mut self, response: WorkerResponse) {
        self.pending_export = None;
        match response {
            WorkerResponse::Exported { path, rows, .. } => {
                self.status_message = Some(format!("Exported {} rows to {}", rows, path.display()));
            }
            WorkerResponse::Error { message, .. } => {
                self.error_message = Some(message);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::View;
    use crate::models::{default_games, FileSummary, SeriesRow};
    use chrono::TimeZone;
    use serde_json::json;
    use std::path::PathBuf;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 11, 12, 0, 0).unwrap()
    }

    fn row(id: &str) -> SeriesRow {
        SeriesRow {
            start_time: "2024-05-10T12:00:00Z".to_string(),
            series_id: id.to_string(),
            tournament_name: "LEC".to_string(),
            team_one_name: "G2".to_string(),
            team_two_name: "FNC".to_string(),
        }
    }

    fn loaded_state(rows: Vec<SeriesRow>) -> AppState {
        let mut state = AppState::new(default_games());
        state.selected_title_id = Some("3".to_string());
        state.rows = rows;
        state.screen = Screen::Table(TableMode::Loaded);
        state
    }

    fn type_days(state: &mut AppState, digits: &str) {
        for c in digits.chars() {
            state.handle_event(UiEvent::Digit(c), now());
        }
    }

    #[test]
    fn test_search_window() {
        let (start, end) = search_window(now(), 10, 1);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 5, 12, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_search_window_never_overflows() {
        let (start, end) = search_window(now(), u32::MAX, u32::MAX);
        assert!(start <= now());
        assert!(end >= now());
    }

    #[test]
    fn test_select_game_and_days_issue_search() {
        let mut state = AppState::new(default_games());

        assert!(state.handle_event(UiEvent::Confirm, now()).is_none());
        assert_eq!(state.selected_title_id.as_deref(), Some("3"));

        type_days(&mut state, "10");
        assert!(state.handle_event(UiEvent::Confirm, now()).is_none());
        type_days(&mut state, "1");

        let cmd = state.handle_event(UiEvent::Confirm, now());
        match cmd {
            Some(WorkerCommand::Search {
                id,
                title_id,
                start_time,
                end_time,
            }) => {
                assert_eq!(title_id, "3");
                assert_eq!((start_time, end_time), search_window(now(), 10, 1));
                assert_eq!(state.screen, Screen::Table(TableMode::Loading { request_id: id }));
            }
            other => panic!("expected search, got {:?}", other),
        }
        assert!(state.is_loading());
    }

    #[test]
    fn test_second_game_selects_valorant() {
        let mut state = AppState::new(default_games());
        state.handle_event(UiEvent::Down, now());
        state.handle_event(UiEvent::Confirm, now());
        assert_eq!(state.selected_title_id.as_deref(), Some("6"));
    }

    #[test]
    fn test_empty_days_count_as_zero() {
        let mut state = AppState::new(default_games());
        state.handle_event(UiEvent::Confirm, now());
        state.handle_event(UiEvent::Confirm, now());
        match state.handle_event(UiEvent::Confirm, now()) {
            Some(WorkerCommand::Search {
                start_time, end_time, ..
            }) => {
                assert_eq!(start_time, now());
                assert_eq!(end_time, now());
            }
            other => panic!("expected search, got {:?}", other),
        }
    }

    #[test]
    fn test_backspace_edits_day_input() {
        let mut state = AppState::new(default_games());
        state.handle_event(UiEvent::Confirm, now());
        type_days(&mut state, "123");
        state.handle_event(UiEvent::Backspace, now());
        match state.to_render_state().view {
            View::DayPrompt { input, .. } => assert_eq!(input, "12"),
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_search_results_populate_sorted_rows() {
        let mut state = loaded_state(Vec::new());
        state.screen = Screen::Table(TableMode::Loading { request_id: 7 });
        let raw = json!({"data": {"allSeries": {"edges": [
            {"node": {"id": "2", "startTimeScheduled": "2024-05-10T12:00:00Z",
                      "tournament": {"name": "LEC"},
                      "teams": [{"baseInfo": {"name": "G2"}}, {"baseInfo": {"name": "FNC"}}]}},
            {"node": {"id": "1", "startTimeScheduled": "2024-05-02T12:00:00Z",
                      "tournament": {"name": "LCK"},
                      "teams": [{"baseInfo": {"name": "T1"}}, {"baseInfo": {"name": "GEN"}}]}}
        ]}}});

        state.handle_response(WorkerResponse::SearchResults { id: 7, raw });

        assert_eq!(state.screen, Screen::Table(TableMode::Loaded));
        let ids: Vec<_> = state.rows.iter().map(|r| r.series_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_structural_failure_sets_error() {
        let mut state = loaded_state(Vec::new());
        state.screen = Screen::Table(TableMode::Loading { request_id: 3 });

        state.handle_response(WorkerResponse::SearchResults {
            id: 3,
            raw: json!({"errors": [{"message": "Unauthorized"}]}),
        });

        assert!(!state.is_loading());
        assert!(state.error_message.as_deref().unwrap().contains("Unauthorized"));
        assert!(state.to_render_state().error_message.is_some());
    }

    fn pick_id(state: &AppState, kind: PickKind) -> u64 {
        match state.to_render_state().pick {
            Some(request) if request.kind == kind => request.id,
            other => panic!("expected {:?} dialog, got {:?}", kind, other),
        }
    }

    #[test]
    fn test_export_sends_all_rows() {
        let mut state = loaded_state(vec![row("1"), row("2"), row("3")]);

        assert!(state.handle_event(UiEvent::Export, now()).is_none());
        let id = pick_id(&state, PickKind::ExportFile);
        assert!(!state.is_loading());
        // Second export while the first is pending is ignored
        state.handle_event(UiEvent::Export, now());
        assert_eq!(pick_id(&state, PickKind::ExportFile), id);

        let picked = UiEvent::Picked {
            id,
            path: Some(PathBuf::from("/tmp/out")),
        };
        match state.handle_event(picked, now()) {
            Some(WorkerCommand::Export { id: export_id, rows, path }) => {
                assert_eq!(export_id, id);
                assert_eq!(rows.len(), 3);
                assert_eq!(path, PathBuf::from("/tmp/out"));
            }
            other => panic!("expected export, got {:?}", other),
        }
        assert!(state.to_render_state().pick.is_none());
        assert_eq!(state.pending_export, Some(id));
    }

    #[test]
    fn test_export_completion_and_cancel() {
        let mut state = loaded_state(vec![row("1")]);
        state.export_rows();
        let id = pick_id(&state, PickKind::ExportFile);
        state.handle_pick(id, Some(PathBuf::from("/tmp/series.csv")));
        state.handle_response(WorkerResponse::Exported {
            id,
            path: PathBuf::from("/tmp/series.csv"),
            rows: 1,
        });
        assert!(state.pending_export.is_none());
        assert!(state.status_message.as_deref().unwrap().contains("/tmp/series.csv"));

        state.export_rows();
        let id = pick_id(&state, PickKind::ExportFile);
        state.status_message = None;
        assert!(state.handle_pick(id, None).is_none());
        assert!(state.pending_export.is_none());
        assert!(state.pending_pick.is_none());
        assert!(state.error_message.is_none());
        assert!(state.status_message.is_none());
        assert_eq!(state.screen, Screen::Table(TableMode::Loaded));
    }

    #[test]
    fn test_confirm_row_lists_files_then_options() {
        let mut state = loaded_state(vec![row("100"), row("200")]);
        state.handle_event(UiEvent::Down, now());

        let id = match state.handle_event(UiEvent::Confirm, now()) {
            Some(WorkerCommand::ListFiles { id, series_id }) => {
                assert_eq!(series_id, "200");
                id
            }
            other => panic!("expected file listing, got {:?}", other),
        };
        assert!(state.is_loading());

        state.handle_response(WorkerResponse::FileList {
            id,
            summary: FileSummary {
                replay_count: 2,
                has_archive: true,
            },
        });

        match state.to_render_state().view {
            View::SelectDownloadOption { options, selected } => {
                let titles: Vec<_> = options.iter().map(|o| o.title.as_str()).collect();
                assert_eq!(
                    titles,
                    vec!["Download Events Archive", "Download Game 1", "Download Game 2"]
                );
                assert_eq!(selected, 0);
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_confirm_on_empty_table_is_noop() {
        let mut state = loaded_state(Vec::new());
        assert!(state.handle_event(UiEvent::Confirm, now()).is_none());
        assert_eq!(state.screen, Screen::Table(TableMode::Loaded));
    }

    fn option_state(rows: Vec<SeriesRow>) -> AppState {
        let mut state = loaded_state(rows);
        state.screen = Screen::SelectDownloadOption {
            series_id: "100".to_string(),
            options: FileSummary {
                replay_count: 2,
                has_archive: true,
            }
            .download_options(),
            selected: 0,
        };
        state
    }

    #[test]
    fn test_download_asks_for_directory_then_dispatches() {
        let mut state = option_state(vec![row("100")]);
        state.select_next();

        assert!(state.handle_event(UiEvent::Confirm, now()).is_none());
        assert!(state.is_loading());
        let id = pick_id(&state, PickKind::DownloadDirectory);

        let picked = UiEvent::Picked {
            id,
            path: Some(PathBuf::from("/tmp")),
        };
        match state.handle_event(picked, now()) {
            Some(WorkerCommand::Download {
                id: download_id,
                series_id,
                option,
                directory,
            }) => {
                assert_eq!(download_id, id);
                assert_eq!(series_id, "100");
                assert_eq!(option, DownloadOption::Replay(1));
                assert_eq!(directory, PathBuf::from("/tmp"));
            }
            other => panic!("expected download, got {:?}", other),
        }
        assert!(state.is_loading());
    }

    #[test]
    fn test_download_failure_returns_to_table() {
        let rows = vec![row("100")];
        let mut state = option_state(rows.clone());
        state.handle_event(UiEvent::Confirm, now());
        let id = pick_id(&state, PickKind::DownloadDirectory);
        state.handle_pick(id, Some(PathBuf::from("/tmp")));

        state.handle_response(WorkerResponse::Error {
            id,
            message: "Error downloading events archive: Unexpected status code 404".to_string(),
        });

        assert_eq!(state.screen, Screen::Table(TableMode::Loaded));
        assert!(!state.is_loading());
        assert!(state.error_message.is_some());
        assert_eq!(state.rows, rows);
    }

    #[test]
    fn test_download_complete_returns_to_table() {
        let rows = vec![row("100"), row("200")];
        let mut state = option_state(rows.clone());
        state.handle_event(UiEvent::Confirm, now());
        let id = pick_id(&state, PickKind::DownloadDirectory);
        state.handle_pick(id, Some(PathBuf::from("/tmp")));

        state.handle_response(WorkerResponse::DownloadComplete {
            id,
            path: PathBuf::from("/tmp/100.zip"),
        });

        assert_eq!(state.screen, Screen::Table(TableMode::Loaded));
        assert!(!state.is_loading());
        assert!(state.error_message.is_none());
        assert_eq!(state.rows, rows);
        assert!(state.status_message.as_deref().unwrap().contains("/tmp/100.zip"));
    }

    #[test]
    fn test_cancelled_download_returns_quietly() {
        let mut state = option_state(vec![row("100")]);
        state.handle_event(UiEvent::Confirm, now());
        let id = pick_id(&state, PickKind::DownloadDirectory);

        let cmd = state.handle_event(UiEvent::Picked { id, path: None }, now());

        assert!(cmd.is_none());
        assert_eq!(state.screen, Screen::Table(TableMode::Loaded));
        assert!(state.error_message.is_none());
        assert!(state.to_render_state().pick.is_none());
    }

    #[test]
    fn test_stale_destination_is_ignored() {
        let mut state = option_state(vec![row("100")]);
        state.handle_event(UiEvent::Confirm, now());
        let id = pick_id(&state, PickKind::DownloadDirectory);

        let stale = UiEvent::Picked {
            id: id + 10,
            path: Some(PathBuf::from("/tmp")),
        };
        assert!(state.handle_event(stale, now()).is_none());
        assert_eq!(pick_id(&state, PickKind::DownloadDirectory), id);
        assert!(state.is_loading());
    }

    #[test]
    fn test_confirm_on_empty_option_list_is_noop() {
        let mut state = loaded_state(vec![row("100")]);
        state.screen = Screen::SelectDownloadOption {
            series_id: "100".to_string(),
            options: Vec::new(),
            selected: 0,
        };
        assert!(state.handle_event(UiEvent::Confirm, now()).is_none());
        assert!(matches!(state.screen, Screen::SelectDownloadOption { .. }));
    }

    #[test]
    fn test_back_leaves_option_list() {
        let mut state = loaded_state(vec![row("100")]);
        state.screen = Screen::SelectDownloadOption {
            series_id: "100".to_string(),
            options: FileSummary::default().download_options(),
            selected: 0,
        };
        state.handle_event(UiEvent::Back, now());
        assert_eq!(state.screen, Screen::Table(TableMode::Loaded));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = loaded_state(vec![row("1")]);
        state.screen = Screen::Table(TableMode::Loading { request_id: 5 });

        state.handle_response(WorkerResponse::Error {
            id: 4,
            message: "late".to_string(),
        });

        assert_eq!(state.screen, Screen::Table(TableMode::Loading { request_id: 5 }));
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_keys_ignored_while_loading() {
        let mut state = loaded_state(vec![row("1"), row("2")]);
        state.screen = Screen::Table(TableMode::ListingFiles {
            request_id: 2,
            series_id: "1".to_string(),
        });
        let before = state.screen.clone();

        for event in [UiEvent::Down, UiEvent::Confirm, UiEvent::Export, UiEvent::Digit('1')] {
            assert!(state.handle_event(event, now()).is_none());
        }
        assert_eq!(state.screen, before);
        assert_eq!(state.selected_row, 0);
        assert!(state.pending_export.is_none());
    }

    #[test]
    fn test_stale_file_list_after_leaving_is_discarded() {
        let mut state = loaded_state(vec![row("100")]);
        let id = match state.handle_event(UiEvent::Confirm, now()) {
            Some(WorkerCommand::ListFiles { id, .. }) => id,
            other => panic!("expected file listing, got {:?}", other),
        };
        state.handle_response(WorkerResponse::FileList {
            id,
            summary: FileSummary::default(),
        });
        state.handle_event(UiEvent::Back, now());
        assert_eq!(state.screen, Screen::Table(TableMode::Loaded));

        // A duplicate of the answered listing arrives late
        state.handle_response(WorkerResponse::FileList {
            id,
            summary: FileSummary {
                replay_count: 3,
                has_archive: true,
            },
        });

        assert_eq!(state.screen, Screen::Table(TableMode::Loaded));
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_first_key_after_error_only_dismisses() {
        let mut state = loaded_state(vec![row("1"), row("2")]);
        state.error_message = Some("boom".to_string());

        assert!(state.handle_event(UiEvent::Confirm, now()).is_none());
        assert!(state.error_message.is_none());
        assert_eq!(state.screen, Screen::Table(TableMode::Loaded));

        state.handle_event(UiEvent::Down, now());
        assert_eq!(state.selected_row, 1);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut state = AppState::new(default_games());
        for _ in 0..10 {
            state.handle_event(UiEvent::Down, now());
        }
        assert_eq!(state.selected_game, 2);
        for _ in 0..10 {
            state.handle_event(UiEvent::Up, now());
        }
        assert_eq!(state.selected_game, 0);
    }
}
