//! Destination pickers, opened from the UI thread
//!
//! Native dialogs must run on the main thread on some platforms, so the app
//! only asks for a destination and the UI loop answers with `UiEvent::Picked`.

use std::path::PathBuf;

use crate::constants::DEFAULT_EXPORT_NAME;
use crate::messages::{PickKind, PickRequest, UiEvent};

/// Asks the user where to put a file. `None` means the picker was dismissed.
pub trait DestinationPicker {
    fn pick_directory(&self) -> Option<PathBuf>;
    fn pick_export_file(&self) -> Option<PathBuf>;
}

/// Native file dialogs
pub struct NativePicker;

impl DestinationPicker for NativePicker {
    fn pick_directory(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Select Download Directory")
            .pick_folder()
    }

    fn pick_export_file(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Save CSV File")
            .set_file_name(DEFAULT_EXPORT_NAME)
            .add_filter("CSV", &["csv"])
            .save_file()
    }
}

/// Remembers which request was already shown so each dialog opens once
#[derive(Debug, Default)]
pub struct PickTracker {
    last: Option<u64>,
}

impl PickTracker {
    /// The request to open now, if it has not been opened before
    pub fn next(&mut self, pending: Option<PickRequest>) -> Option<PickRequest> {
        let request = pending?;
        if self.last == Some(request.id) {
            return None;
        }
        self.last = Some(request.id);
        Some(request)
    }
}

/// Open the dialog for `request` and wrap the answer for the app
pub fn resolve(picker: &dyn DestinationPicker, request: PickRequest) -> UiEvent {
    let path = match request.kind {
        PickKind::DownloadDirectory => picker.pick_directory(),
        PickKind::ExportFile => picker.pick_export_file(),
    };
    tracing::debug!(id = request.id, kind = ?request.kind, picked = path.is_some(), "Picker closed");
    UiEvent::Picked {
        id: request.id,
        path,
    }
}
