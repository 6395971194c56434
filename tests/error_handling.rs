use repo_languages::error::{RepoLanguagesError, Result};
use repo_languages::github::GitHubClient;
use std::error::Error;

#[test]
fn test_error_display() {
    let error = RepoLanguagesError::ApiError("API failed".to_string());
    assert_eq!(format!("{}", error), "GitHub API error: API failed");

    let error = RepoLanguagesError::ServerError("bind failed".to_string());
    assert_eq!(format!("{}", error), "Server error: bind failed");
}

#[test]
fn test_error_source() {
    let error = RepoLanguagesError::ApiError("API failed".to_string());
    assert!(error.source().is_none());

    let io_error = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let error: RepoLanguagesError = io_error.into();
    assert!(error.source().is_some());
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
    let error: RepoLanguagesError = io_error.into();
    assert!(matches!(error, RepoLanguagesError::IoError(_)));

    let parse_error = url::Url::parse("not a url").unwrap_err();
    let error: RepoLanguagesError = parse_error.into();
    assert!(matches!(error, RepoLanguagesError::InvalidApiUrl(_)));
}

#[test]
fn test_invalid_api_url_rejected() {
    match GitHubClient::with_base_url("::not-a-url::", None) {
        Err(RepoLanguagesError::InvalidApiUrl(_)) => {}
        other => panic!("Expected InvalidApiUrl error, got: {:?}", other),
    }
}

#[test]
fn test_result_type() {
    fn returns_result() -> Result<String> {
        Ok("success".to_string())
    }

    let result = returns_result();
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "success");
}
