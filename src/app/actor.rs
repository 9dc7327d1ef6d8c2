//! App actor - message loop processing UI events and worker responses

use chrono::Utc;
use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{RenderState, UiEvent, WorkerCommand, WorkerResponse};
use crate::models::SelectableItem;

/// App actor that processes UI events and worker responses
pub struct AppActor {
    state: AppState,
    worker_tx: mpsc::UnboundedSender<WorkerCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        games: Vec<SelectableItem>,
        worker_tx: mpsc::UnboundedSender<WorkerCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(games),
            worker_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut worker_rx: mpsc::UnboundedReceiver<WorkerResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.worker_tx.send(WorkerCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = worker_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }

        tracing::info!("App actor stopped");
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        if event == UiEvent::Quit {
            return true;
        }

        if let Some(cmd) = self.state.handle_event(event, Utc::now()) {
            let _ = self.worker_tx.send(cmd);
        }
        false
    }
}
