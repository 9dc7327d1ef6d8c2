//! Render state - data structure sent from App layer to UI for rendering

use crate::models::{SelectableItem, SeriesRow};

/// What the active screen shows
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    SelectGame {
        items: Vec<SelectableItem>,
        selected: usize,
    },
    DayPrompt {
        prompt: &'static str,
        input: String,
    },
    Loading {
        label: &'static str,
    },
    Table {
        rows: Vec<SeriesRow>,
        selected: usize,
    },
    SelectDownloadOption {
        options: Vec<SelectableItem>,
        selected: usize,
    },
}

/// Which destination dialog to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickKind {
    DownloadDirectory,
    ExportFile,
}

/// A destination dialog the UI thread must open once and answer with `UiEvent::Picked`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickRequest {
    pub id: u64,
    pub kind: PickKind,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub view: View,
    /// Replaces the whole view while set
    pub error_message: Option<String>,
    pub status_message: Option<String>,
    pub pick: Option<PickRequest>,
}

impl RenderState {
    pub fn is_loading(&self) -> bool {
        matches!(self.view, View::Loading { .. })
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            view: View::SelectGame {
                items: Vec::new(),
                selected: 0,
            },
            error_message: None,
            status_message: None,
            pick: None,
        }
    }
}
