//! Application state container shared across Axum route handlers.
//!
//! This struct holds the document store handle and the notification sink.
//! It is cheap to clone and passed into route handlers via Axum's `State<T>`
//! extractor.

use notifier::Notifier;
use std::sync::Arc;
use store::DocumentStore;

/// Central application state shared across the server.
///
/// This includes:
/// - A shared handle to the document store (Appwrite in production, an
///   in-memory store in the test suite).
/// - The notification sink used for operational logging and alerting.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn DocumentStore>,
    notifier: Notifier,
}

impl AppState {
    /// Creates a new `AppState` with the given store handle and notifier.
    pub fn new(store: Arc<dyn DocumentStore>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// Returns a shared reference to the document store.
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Returns a shared reference to the notification sink.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}
