use anyhow::{Context, Result};
use octocrab::Octocrab;

/// Install the rustls crypto provider (required for rustls 0.23+).
/// Safe to call more than once.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

const USER_AGENT: &str = concat!("repolens/", env!("CARGO_PKG_VERSION"));

/// Create a GitHub client, authenticated when a personal access token is given.
/// Without a token requests are anonymous (lower rate limit).
pub fn create_client(token: Option<&str>) -> Result<Octocrab> {
    let builder = Octocrab::builder();
    let client = match token {
        Some(token) => builder.personal_token(token.to_string()).build(),
        None => builder.build(),
    };
    client.context("Failed to create GitHub client")
}

/// Plain HTTP client for downloading raw README contents
pub fn create_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")
}
