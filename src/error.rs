use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoStatsError {
    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Empty submission")]
    EmptySubmission,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Query cache error: {0}")]
    CacheError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, RepoStatsError>;
