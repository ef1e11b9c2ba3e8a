use workflow::bulk::BulkError;
use workflow::config::ConfigError;
use workflow::error::{ApiError, ValidationError};
use workflow::grading::GradingError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing API token; pass --token or set REVIEW_TOKEN")]
    MissingToken,
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Bulk(#[from] BulkError),
    #[error("{path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("unknown criterion `{0}` in scores file")]
    UnknownCriterion(String),
    #[error("aborted")]
    Aborted,
}

impl From<GradingError> for CliError {
    fn from(error: GradingError) -> Self {
        match error {
            GradingError::Invalid(error) => Self::Invalid(error),
            GradingError::Api(error) => Self::Api(error),
        }
    }
}

impl CliError {
    pub fn io(path: &str, source: std::io::Error) -> Self {
        Self::Io { path: path.to_owned(), source }
    }
}
