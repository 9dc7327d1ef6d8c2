//! # Stealth Grid
//!
//! A terminal client for the GRID esports data service.
//!
//! ## Features
//! - Series search by game title and time window
//! - Sorted series table with CSV export
//! - Events archive and replay downloads
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Worker Layer (Tokio runtime)

pub mod constants;
pub mod config;
pub mod models;
pub mod transform;
pub mod export;
pub mod gateway;
pub mod ui;
pub mod messages;
pub mod app;
pub mod worker;
pub mod picker;

// Re-export commonly used types
pub use models::{DownloadOption, FileSummary, SelectableItem, SeriesRow};
pub use config::{Config, ConfigStore};
pub use gateway::{GatewayError, GridClient};
pub use messages::{RenderState, UiEvent, WorkerCommand, WorkerResponse};
pub use app::{AppActor, AppState};
pub use worker::WorkerActor;
