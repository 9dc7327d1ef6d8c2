//! Worker layer - runs API calls and disk writes off the app loop

pub mod actor;

pub use actor::WorkerActor;
