use anyhow::{Context, Result};

use crate::github::types::profile_url_for;

/// Open a URL in the user's default browser
///
/// # Errors
/// Returns error if browser cannot be opened (e.g., no browser available)
pub fn open_url(url: &str) -> Result<()> {
    webbrowser::open(url)
        .with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(())
}

/// Open a GitHub profile page by login
pub fn open_profile(login: &str) -> Result<()> {
    open_url(&profile_url_for(login))
}
