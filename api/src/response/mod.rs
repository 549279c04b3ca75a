use serde::Serialize;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// Every endpoint answers with this envelope:
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "total": 3,
///   "message": "Course deleted"
/// }
/// ```
///
/// - `data` carries the document (or document list) for reads and writes.
/// - `total` accompanies list responses.
/// - `message` is a human-readable context string for data-less successes.
/// - `error` and `details` are only present on failures; `details` carries
///   the underlying error text and is emitted outside production only.
///
/// Absent fields are omitted from the serialized body entirely.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Success response wrapping a single payload.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            total: None,
            message: None,
            error: None,
            details: None,
        }
    }

    /// Success response wrapping a list payload and its total count.
    pub fn list(data: T, total: u64) -> Self {
        Self {
            total: Some(total),
            ..Self::data(data)
        }
    }

    /// Success response carrying only a message (e.g. after a delete).
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            total: None,
            message: Some(message.into()),
            error: None,
            details: None,
        }
    }

    /// Failure response with an error message.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            total: None,
            message: None,
            error: Some(error.into()),
            details: None,
        }
    }

    /// Attaches a payload to the response (used by the 404 fallback to list
    /// the available endpoints).
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    /// Attaches a developer-facing detail string.
    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }

    /// Attaches a human-readable message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
