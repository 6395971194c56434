use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::GitHubRepo;

/// Display value used when GitHub reports no primary language.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Hourly request quota GitHub grants unauthenticated clients.
pub const PUBLIC_RATE_LIMIT_PER_HOUR: u32 = 60;

/// One trigger of the fetcher: who to look up and with which credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub username: String,
    pub credential: Option<String>,
}

impl FetchRequest {
    pub fn new(username: impl Into<String>, credential: Option<String>) -> Self {
        Self {
            username: username.into(),
            credential,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.username.trim().is_empty()
    }
}

/// A repository name paired with its primary language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySummary {
    pub name: String,
    pub language: String,
    /// Set when GitHub returned no language and `language` holds [`NOT_SPECIFIED`].
    pub defaulted: bool,
}

impl RepositorySummary {
    pub fn from_repo(repo: GitHubRepo) -> Self {
        match repo.language.filter(|language| !language.is_empty()) {
            Some(language) => Self {
                name: repo.name,
                language,
                defaulted: false,
            },
            None => Self {
                name: repo.name,
                language: NOT_SPECIFIED.to_string(),
                defaulted: true,
            },
        }
    }
}

/// Outcome of a single fetch. Every failure mode is a variant here; the
/// fetcher never returns an `Err`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum FetchResult {
    /// Repositories in the order GitHub listed them
    Success(Vec<RepositorySummary>),
    /// No username was supplied, nothing was requested
    Empty,
    RateLimited {
        remaining: Option<u32>,
        reset_at: Option<DateTime<Utc>>,
    },
    HttpError {
        status_code: u16,
    },
    TransportError {
        message: String,
    },
}

impl FetchResult {
    pub fn is_error(&self) -> bool {
        !matches!(self, FetchResult::Success(_) | FetchResult::Empty)
    }

    /// User-facing message for the error variants.
    pub fn message(&self) -> Option<String> {
        match self {
            FetchResult::Success(_) | FetchResult::Empty => None,
            FetchResult::RateLimited {
                remaining,
                reset_at,
            } => {
                let mut message = format!(
                    "GitHub API rate limit exceeded. The public quota for unauthenticated requests is {} per hour.",
                    PUBLIC_RATE_LIMIT_PER_HOUR
                );
                if let Some(remaining) = remaining {
                    message.push_str(&format!(" Remaining requests: {}.", remaining));
                }
                if let Some(reset_at) = reset_at {
                    message.push_str(&format!(
                        " Rate limit resets at {}.",
                        reset_at.timestamp()
                    ));
                }
                Some(message)
            }
            FetchResult::HttpError { status_code } => Some(format!(
                "Failed to fetch data. Status code: {}",
                status_code
            )),
            FetchResult::TransportError { message } => Some(message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_username() {
        assert!(FetchRequest::new("", None).is_blank());
        assert!(FetchRequest::new("  \t\n", None).is_blank());
        assert!(!FetchRequest::new(" octocat ", None).is_blank());
    }

    #[test]
    fn test_summary_defaults_missing_language() {
        let summary = RepositorySummary::from_repo(GitHubRepo {
            name: "dotfiles".to_string(),
            language: None,
        });
        assert_eq!(summary.language, NOT_SPECIFIED);
        assert!(summary.defaulted);

        let summary = RepositorySummary::from_repo(GitHubRepo {
            name: "blank".to_string(),
            language: Some(String::new()),
        });
        assert_eq!(summary.language, NOT_SPECIFIED);
        assert!(summary.defaulted);
    }

    #[test]
    fn test_summary_keeps_language() {
        let summary = RepositorySummary::from_repo(GitHubRepo {
            name: "server".to_string(),
            language: Some("Rust".to_string()),
        });
        assert_eq!(summary.name, "server");
        assert_eq!(summary.language, "Rust");
        assert!(!summary.defaulted);
    }

    #[test]
    fn test_rate_limited_message() {
        let result = FetchResult::RateLimited {
            remaining: Some(0),
            reset_at: DateTime::from_timestamp(1_700_000_000, 0),
        };
        let message = result.message().unwrap();
        assert!(message.contains("unauthenticated requests is 60 per hour"));
        assert!(message.contains("Remaining requests: 0."));
        assert!(message.contains("resets at 1700000000"));
    }

    #[test]
    fn test_rate_limited_message_without_headers() {
        let result = FetchResult::RateLimited {
            remaining: None,
            reset_at: None,
        };
        assert_eq!(
            result.message().unwrap(),
            "GitHub API rate limit exceeded. The public quota for unauthenticated requests is 60 per hour."
        );
    }

    #[test]
    fn test_http_error_message() {
        let result = FetchResult::HttpError { status_code: 404 };
        assert!(result.is_error());
        assert_eq!(
            result.message().unwrap(),
            "Failed to fetch data. Status code: 404"
        );
    }

    #[test]
    fn test_success_and_empty_are_not_errors() {
        assert!(!FetchResult::Empty.is_error());
        assert!(FetchResult::Empty.message().is_none());
        assert!(!FetchResult::Success(Vec::new()).is_error());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(FetchResult::HttpError { status_code: 500 }).unwrap();
        assert_eq!(json["status"], "http_error");
        assert_eq!(json["data"]["status_code"], 500);

        let json = serde_json::to_value(FetchResult::Empty).unwrap();
        assert_eq!(json["status"], "empty");
    }
}
