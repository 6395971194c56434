use crate::error::{RepoLanguagesError, Result};
use crate::github::GitHubClient;
use crate::models::FetchResult;
use crate::table::{escape_html, Table};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub github: Arc<GitHubClient>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(github: GitHubClient) -> Self {
        Self {
            github: Arc::new(github),
            start_time: Instant::now(),
        }
    }
}

/// Query string of the widget form. `github_handle` is only present once
/// the fetch button has been pressed.
#[derive(Debug, Deserialize)]
pub struct WidgetQuery {
    pub github_handle: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub authenticated: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(widget))
        .route("/api/repos/:username", get(repos_json))
        .route("/healthz", get(health_check))
        .route("/livez", get(liveness_check))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Start the widget HTTP server
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Repository widget listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| RepoLanguagesError::ServerError(e.to_string()))?;

    Ok(())
}

async fn widget(State(state): State<AppState>, Query(query): Query<WidgetQuery>) -> Html<String> {
    // Each submission is a fresh fetch; nothing is reused between requests.
    let result = match query.github_handle.as_deref() {
        Some(handle) => state.github.fetch(handle).await,
        None => FetchResult::Empty,
    };

    Html(render_page(query.github_handle.as_deref().unwrap_or(""), &result))
}

async fn repos_json(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Json<FetchResult> {
    Json(state.github.fetch(&username).await)
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        authenticated: state.github.is_authenticated(),
    };

    (StatusCode::OK, Json(response))
}

async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}

pub fn render_page(handle: &str, result: &FetchResult) -> String {
    let table = Table::from(result);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>GitHub Repositories</title>
<style>
body {{ display: flex; font-family: sans-serif; margin: 0; }}
aside {{ width: 260px; padding: 1.5rem; background: #f5f5f5; }}
main {{ flex: 1; padding: 1.5rem; }}
.card {{ border: 1px solid #ddd; border-radius: 6px; }}
.card-header {{ padding: 0.75rem 1rem; border-bottom: 1px solid #ddd; font-weight: bold; }}
.table {{ border-collapse: collapse; margin: 1rem; }}
.table th, .table td {{ text-align: left; padding: 0.25rem 1rem 0.25rem 0; }}
.note {{ font-size: 0.8em; color: #666; }}
</style>
</head>
<body>
<aside>
<form method="get" action="/">
<label for="github_handle">GitHub Username:</label>
<input type="text" id="github_handle" name="github_handle" placeholder="octocat" value="{handle}">
<button type="submit">Fetch Repositories</button>
</form>
<hr>
<div class="note">This app fetches public repository information from GitHub.</div>
</aside>
<main>
<div class="card">
<div class="card-header">Repository Information</div>
{table}
</div>
</main>
</body>
</html>
"#,
        handle = escape_html(handle),
        table = table.to_html(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_page_keeps_handle_and_table() {
        let page = render_page("\"octo\"", &FetchResult::Empty);
        assert!(page.contains("value=\"&quot;octo&quot;\""));
        assert!(page.contains("<th>Repository</th><th>Primary Language</th>"));
        assert!(page.contains("Fetch Repositories"));
    }

    #[test]
    fn test_render_page_error() {
        let page = render_page("ghost", &FetchResult::HttpError { status_code: 404 });
        assert!(page.contains("<th>Error</th>"));
        assert!(page.contains("Status code: 404"));
    }
}
