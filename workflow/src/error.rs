//! Error taxonomy shared by every workflow module.
//!
//! DESIGN
//! ======
//! Validation failures never leave the client; they carry the field to focus.
//! HTTP failures carry the best human message the response body offers.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Failure talking to the REST API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The response body could not be decoded into the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The operation needs a browser (or a configured HTTP client) and none is available.
    #[error("not available in this environment")]
    Unavailable,
}

impl ApiError {
    /// Build an [`ApiError::Http`] from a status code and raw response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Http { status, message: error_message_from_body(status, body) }
    }

    /// HTTP status if this is a server response error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Extract a user-facing message from an error response body.
///
/// JSON bodies are searched for `error`, `message` and `detail` (in that
/// order); otherwise the trimmed raw text is used; an empty body falls back to
/// a generic status message.
pub fn error_message_from_body(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
        for key in ["error", "message", "detail"] {
            match json.get(key) {
                Some(Value::String(text)) if !text.trim().is_empty() => return text.trim().to_owned(),
                Some(Value::Object(inner)) => {
                    if let Some(Value::String(text)) = inner.get("message") {
                        return text.trim().to_owned();
                    }
                }
                _ => {}
            }
        }
    }
    if trimmed.is_empty() || trimmed.starts_with('{') {
        return format!("Request failed with status {status}");
    }
    trimmed.to_owned()
}

/// Input field a validation error points at, used to move focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Category,
    Authors,
    Content,
    Attachment,
    Scores,
}

/// Client-side validation failure. Blocks the operation locally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a title.")]
    TitleMissing,

    #[error("Title must be at most {limit} words (currently {words}).")]
    TitleTooLong { words: usize, limit: usize },

    #[error("Please select a category.")]
    CategoryMissing,

    #[error("Add at least one author with a name.")]
    NoNamedAuthor,

    #[error("Author {row} has an invalid email address: {email}")]
    InvalidEmail { row: usize, email: String },

    #[error("Exactly one presenting author must be selected (found {count}).")]
    PresenterCount { count: usize },

    #[error("Exactly one corresponding author must be selected (found {count}).")]
    CorrespondingCount { count: usize },

    #[error("Please write the abstract content.")]
    ContentEmpty,

    #[error("Abstract content must be at most {limit} words (currently {words}).")]
    ContentTooLong { words: usize, limit: usize },

    #[error("Only PDF files are accepted ({name}).")]
    PdfType { name: String },

    #[error("File is larger than the {max_mb} MB limit.")]
    PdfTooLarge { size_bytes: u64, max_mb: u32 },

    #[error("{} score(s) are outside their allowed range.", .criteria.len())]
    ScoresOutOfRange { criteria: Vec<String> },
}

impl ValidationError {
    /// Field that should receive focus when this error is shown.
    pub fn field(&self) -> Field {
        match self {
            Self::TitleMissing | Self::TitleTooLong { .. } => Field::Title,
            Self::CategoryMissing => Field::Category,
            Self::NoNamedAuthor
            | Self::InvalidEmail { .. }
            | Self::PresenterCount { .. }
            | Self::CorrespondingCount { .. } => Field::Authors,
            Self::ContentEmpty | Self::ContentTooLong { .. } => Field::Content,
            Self::PdfType { .. } | Self::PdfTooLarge { .. } => Field::Attachment,
            Self::ScoresOutOfRange { .. } => Field::Scores,
        }
    }
}
