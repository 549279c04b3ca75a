//! Shared utilities for the EdTech API workspace.
//!
//! - [`config`] — environment-backed application configuration singleton.
//! - [`state`] — the `AppState` container handed to Axum route handlers.

pub mod config;
pub mod state;
