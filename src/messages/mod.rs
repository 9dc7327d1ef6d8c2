//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Worker layers.

pub mod ui_events;
pub mod worker;
pub mod render;

pub use ui_events::UiEvent;
pub use worker::{WorkerCommand, WorkerResponse};
pub use render::{PickKind, PickRequest, RenderState, View};
