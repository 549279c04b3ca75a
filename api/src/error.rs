//! Typed request-handling errors and the single HTTP error boundary.
//!
//! Handlers return `Result<_, ApiError>`; the `IntoResponse` impl below is the
//! one place failures are mapped to status codes and the JSON envelope:
//!
//! - [`ApiError::MissingFields`] / [`ApiError::InvalidBody`] / [`ApiError::InvalidReference`] → 400
//! - [`ApiError::NotFound`] → 404
//! - [`ApiError::Upstream`] → 502
//!
//! The boundary also records an [`ErrorReport`] response extension so the
//! request-logging middleware can forward the failure to the notification
//! sink without re-parsing the body.

use crate::response::ApiResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use store::StoreError;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Required write attributes are absent (or null/empty).
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// The request body could not be decoded as a JSON object.
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    /// A foreign-key-like attribute names a document that does not exist.
    #[error("Invalid {field}: {id} does not exist in {collection} collection")]
    InvalidReference {
        field: String,
        id: String,
        collection: String,
    },

    /// The target of a point lookup or delete is absent.
    #[error("Document {id} not found in {collection}")]
    NotFound { collection: String, id: String },

    /// The document store failed for a reason other than a missing document.
    #[error("An error occurred processing your request")]
    Upstream(#[source] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields(_) | Self::InvalidBody(_) | Self::InvalidReference { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Developer-facing detail: the underlying failure for upstream errors,
    /// the message itself otherwise.
    fn detail(&self) -> String {
        match self {
            Self::Upstream(source) => source.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => Self::NotFound { collection, id },
            other => Self::Upstream(other),
        }
    }
}

/// Summary of a failed request, stashed in the response extensions for the
/// logging middleware to report to the notification sink.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub message: String,
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        let detail = self.detail();

        tracing::error!(status = %status, error = %detail, "request failed");

        let details = util::config::is_development().then(|| detail.clone());
        let body = ApiResponse::<Value>::error(&message).with_details(details);
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorReport {
            status,
            message,
            detail,
        });
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_by_kind() {
        assert_eq!(
            ApiError::MissingFields(vec!["price".into()]).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound {
                collection: "courses".into(),
                id: "X".into()
            }
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Upstream(StoreError::Unexpected {
                status: 500,
                message: "down".into()
            })
            .status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn missing_fields_message_names_every_field() {
        let err = ApiError::MissingFields(vec!["title".into(), "price".into()]);
        assert_eq!(err.to_string(), "Missing required fields: title, price");
    }

    #[test]
    fn store_not_found_becomes_api_not_found() {
        let err: ApiError = StoreError::not_found("quizzes", "QUIZ_1").into();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }
}
