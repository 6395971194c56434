use crate::error::{RepoLanguagesError, Result};
use crate::models::{FetchRequest, FetchResult, RepositorySummary};
use crate::types::GitHubRepo;
use chrono::DateTime;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::str::FromStr;
use tracing::{debug, error, info, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("repo-languages/", env!("CARGO_PKG_VERSION"));

/// Looks up a user's public repositories. One instance is built at startup
/// and shared for every fetch.
#[derive(Debug)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url(API_BASE_URL, token)
    }

    /// Same as [`GitHubClient::new`] but against another API root, such as a
    /// GitHub Enterprise host.
    pub fn with_base_url(base_url: &str, token: Option<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(RepoLanguagesError::ApiError(format!(
                "API URL cannot hold a path: {}",
                base_url
            )));
        }

        // No timeout override: the client default applies.
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(GitHubClient {
            client,
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Fetch with the credential the client was built with.
    pub async fn fetch(&self, username: &str) -> FetchResult {
        self.fetch_with_credential(username, self.token.as_deref())
            .await
    }

    /// Fetch using the request's credential, falling back to the client's.
    pub async fn fetch_request(&self, request: &FetchRequest) -> FetchResult {
        let credential = request
            .credential
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .or(self.token.as_deref());
        self.fetch_with_credential(&request.username, credential)
            .await
    }

    /// `None` when the username cannot be carried as a single path segment.
    fn repos_url(&self, username: &str) -> Option<Url> {
        // Dot segments are resolved away by URL parsing, in any encoding.
        if username == "." || username == ".." {
            return None;
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(&["users", username, "repos"]);
        Some(url)
    }

    async fn fetch_with_credential(&self, username: &str, credential: Option<&str>) -> FetchResult {
        let username = username.trim();
        if username.is_empty() {
            debug!("Blank username, skipping fetch");
            return FetchResult::Empty;
        }

        let Some(url) = self.repos_url(username) else {
            return FetchResult::TransportError {
                message: format!("Invalid GitHub username: {:?}", username),
            };
        };

        debug!(
            username,
            authenticated = credential.is_some(),
            %url,
            "Fetching repositories"
        );

        let mut request = self.client.get(url).header("Accept", ACCEPT_HEADER);
        if let Some(token) = credential {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Request for {} failed: {}", username, e);
                return FetchResult::TransportError {
                    message: e.to_string(),
                };
            }
        };

        match response.status() {
            StatusCode::OK => {
                let body = match response.text().await {
                    Ok(body) => body,
                    Err(e) => {
                        error!("Failed to read response body for {}: {}", username, e);
                        return FetchResult::TransportError {
                            message: format!("Failed to parse repository listing: {}", e),
                        };
                    }
                };
                match parse_repositories(&body) {
                    Ok(repos) => {
                        info!("Fetched {} repositories for {}", repos.len(), username);
                        FetchResult::Success(repos)
                    }
                    Err(e) => {
                        error!("Unexpected repository listing for {}: {}", username, e);
                        FetchResult::TransportError {
                            message: format!("Failed to parse repository listing: {}", e),
                        }
                    }
                }
            }
            StatusCode::FORBIDDEN => {
                let headers = response.headers();
                let remaining = header_value::<u32>(headers, "X-RateLimit-Remaining");
                let reset_at = header_value::<i64>(headers, "X-RateLimit-Reset")
                    .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0));
                warn!(
                    ?remaining,
                    ?reset_at,
                    "Rate limited while fetching repositories for {}",
                    username
                );
                FetchResult::RateLimited {
                    remaining,
                    reset_at,
                }
            }
            status => {
                warn!("Fetching repositories for {} returned {}", username, status);
                FetchResult::HttpError {
                    status_code: status.as_u16(),
                }
            }
        }
    }
}

/// Parse a repository listing, keeping GitHub's order.
pub fn parse_repositories(body: &str) -> serde_json::Result<Vec<RepositorySummary>> {
    let repos: Vec<GitHubRepo> = serde_json::from_str(body)?;
    Ok(repos.into_iter().map(RepositorySummary::from_repo).collect())
}

/// Read a header as a number; unparseable values count as absent.
fn header_value<T: FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<T>().ok())
}
