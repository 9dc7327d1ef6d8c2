//! Stealth Grid - terminal client for browsing and downloading GRID series data
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Worker Layer (Tokio) - API calls and disk writes
//!
//! File dialogs open on the UI thread.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing_appender::non_blocking::WorkerGuard;

use stealth_grid::config::ConfigStore;
use stealth_grid::constants::LOG_FILE_NAME;
use stealth_grid::gateway::GridClient;
use stealth_grid::messages::ui_events::key_to_ui_event;
use stealth_grid::messages::{RenderState, UiEvent, WorkerCommand, WorkerResponse};
use stealth_grid::models::default_games;
use stealth_grid::ui::draw_ui;
use stealth_grid::picker::{self, NativePicker, PickTracker};
use stealth_grid::worker::WorkerActor;
use stealth_grid::AppActor;

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Log to a file next to the configuration; the terminal belongs to the UI
fn init_logging(store: &ConfigStore) -> Option<WorkerGuard> {
    store.ensure_dir().ok()?;
    let file_appender = tracing_appender::rolling::never(store.dir(), LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let store = ConfigStore::new();
    let log_guard = init_logging(&store);

    // Configuration is read before the terminal switches to raw mode
    let config = match store.bootstrap(&mut io::stdin().lock(), &mut io::stdout()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration failed");
            println!("{:#}", e);
            drop(log_guard);
            std::process::exit(1);
        }
    };
    tracing::info!(?config, "Starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (worker_cmd_tx, worker_cmd_rx) = mpsc::unbounded_channel::<WorkerCommand>();
    let (worker_resp_tx, worker_resp_rx) = mpsc::unbounded_channel::<WorkerResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn worker actor
    let worker_actor = WorkerActor::new(GridClient::new(config), worker_resp_tx);
    tokio::spawn(worker_actor.run(worker_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(default_games(), worker_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, worker_resp_rx));

    // Interrupts that bypass the terminal key stream
    let signal_tx = ui_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = signal_tx.send(UiEvent::Quit);
        }
    });

    // Run UI loop (synchronous with async polling)
    let result = run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await;

    // Background tasks may still be blocked; restore the terminal and leave
    drop(terminal_guard);
    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "UI loop failed");
            eprintln!("{:#}", e);
            1
        }
    };
    tracing::info!(code, "Exiting");
    drop(log_guard);
    std::process::exit(code);
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut tick: usize = 0;
    let mut picks = PickTracker::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state, tick))?;
        tick = tick.wrapping_add(1);

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key) {
                    let quit = event == UiEvent::Quit;
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        loop {
            match render_rx.try_recv() {
                Ok(state) => current_state = state,
                Err(TryRecvError::Empty) => break,
                // App actor stopped
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }

        // Dialogs block this thread until closed
        if let Some(request) = picks.next(current_state.pick) {
            terminal.draw(|f| draw_ui(f, &current_state, tick))?;
            let _ = ui_tx.send(picker::resolve(&NativePicker, request));
        }
    }

    Ok(())
}
