use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoLanguagesError {
    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(#[from] url::ParseError),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Server error: {0}")]
    ServerError(String),
}

pub type Result<T> = std::result::Result<T, RepoLanguagesError>;
