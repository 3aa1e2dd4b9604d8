use anyhow::{anyhow, Context, Result};
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::github::cache::ResponseCache;
use crate::github::types::{Event, ReadmeMeta, RepositorySummary, UserProfile};

#[derive(Debug, Serialize)]
struct PageParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<&'static str>,
    per_page: u32,
}

/// Turn an octocrab error into a message a user can act on
fn describe_error(e: octocrab::Error, what: &str) -> anyhow::Error {
    classify_error(&format!("{:?}", e), what)
}

/// Map the Debug text of a GitHub error to a readable message.
/// Status codes only count in their `status_code: N` form.
fn classify_error(error_str: &str, what: &str) -> anyhow::Error {
    let lower = error_str.to_lowercase();
    if error_str.contains("status_code: 404") || error_str.contains("Not Found") {
        anyhow!("{} not found on GitHub.", what)
    } else if error_str.contains("status_code: 401") || error_str.contains("Bad credentials") {
        anyhow!("Authentication failed. Check the GITHUB_TOKEN environment variable.")
    } else if lower.contains("rate limit") || error_str.contains("status_code: 403") {
        anyhow!("GitHub API rate limit exceeded. Set GITHUB_TOKEN or wait a few minutes.")
    } else {
        anyhow!("GitHub API error while fetching {}: {}", what, error_str)
    }
}

fn cache_key(route: &str, params: Option<&PageParams>) -> String {
    match params {
        Some(p) => match p.sort {
            Some(sort) => format!("{}?sort={}&per_page={}", route, sort, p.per_page),
            None => format!("{}?per_page={}", route, p.per_page),
        },
        None => route.to_string(),
    }
}

/// GET a GitHub route, going through the response cache
async fn cached_get<T: DeserializeOwned>(
    client: &Octocrab,
    cache: &ResponseCache,
    route: &str,
    params: Option<&PageParams>,
    what: &str,
) -> Result<T> {
    let key = cache_key(route, params);

    if let Some(hit) = cache.get::<T>(&key) {
        tracing::debug!(route = %key, "cache hit");
        return Ok(hit);
    }

    let body: serde_json::Value = client
        .get(route, params)
        .await
        .map_err(|e| describe_error(e, what))?;

    cache.put(&key, &body);

    serde_json::from_value(body).with_context(|| format!("Unexpected response shape for {}", what))
}

/// Fetch a user's public profile
pub async fn fetch_profile(
    client: &Octocrab,
    cache: &ResponseCache,
    login: &str,
) -> Result<UserProfile> {
    let route = format!("/users/{}", login);
    cached_get(client, cache, &route, None, &format!("User '{}'", login)).await
}

/// Fetch a user's public repositories, most recently updated first
pub async fn fetch_repositories(
    client: &Octocrab,
    cache: &ResponseCache,
    login: &str,
    limit: u32,
) -> Result<Vec<RepositorySummary>> {
    let route = format!("/users/{}/repos", login);
    let params = PageParams {
        sort: Some("updated"),
        per_page: limit,
    };
    cached_get(
        client,
        cache,
        &route,
        Some(&params),
        &format!("Repositories of '{}'", login),
    )
    .await
}

/// Fetch a user's recent public events (GitHub keeps roughly 90 days)
pub async fn fetch_events(
    client: &Octocrab,
    cache: &ResponseCache,
    login: &str,
    limit: u32,
) -> Result<Vec<Event>> {
    let route = format!("/users/{}/events", login);
    let params = PageParams {
        sort: None,
        per_page: limit,
    };
    cached_get(
        client,
        cache,
        &route,
        Some(&params),
        &format!("Events of '{}'", login),
    )
    .await
}

/// Fetch the raw README of a repository. Any failure yields None.
pub async fn fetch_readme(
    client: &Octocrab,
    http: &reqwest::Client,
    full_name: &str,
) -> Option<String> {
    let route = format!("/repos/{}/readme", full_name);
    let meta: ReadmeMeta = match client.get(&route, None::<&()>).await {
        Ok(meta) => meta,
        Err(e) => {
            tracing::debug!(repo = full_name, error = %e, "no README");
            return None;
        }
    };

    let url = meta.download_url?;
    let response = http.get(&url).send().await.ok()?;
    if !response.status().is_success() {
        tracing::debug!(repo = full_name, status = %response.status(), "README download failed");
        return None;
    }
    response.text().await.ok()
}
