use thiserror::Error;

/// Failures surfaced by the document store client.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested document does not exist in the collection.
    #[error("document {id} not found in {collection}")]
    NotFound { collection: String, id: String },

    /// The HTTP request to the store could not be completed.
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with an unexpected status code.
    #[error("store returned status {status}: {message}")]
    Unexpected { status: u16, message: String },
}

impl StoreError {
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// True when the failure means "that document does not exist", as opposed
    /// to the store being unreachable or misbehaving.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
