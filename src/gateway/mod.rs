//! Remote data gateway - series search, file listing and downloads
//!
//! Every call is a plain async function; the worker layer decides where
//! it runs and how its result reaches the app.

pub mod client;
pub mod query;

pub use client::{GatewayError, GridClient};
