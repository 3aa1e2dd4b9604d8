use std::time::Duration;

use anyhow::{Context, Result};

use super::schema::Config;

const MAX_PER_PAGE: u32 = 100;

/// Parse a humantime duration field, naming the field in the error
pub fn parse_duration_field(field: &str, value: &str) -> Result<Duration> {
    humantime::parse_duration(value.trim())
        .with_context(|| format!("{}: invalid duration '{}'", field, value))
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let github = &config.github;

    if github.repo_limit == 0 || github.repo_limit > MAX_PER_PAGE {
        errors.push(format!(
            "github.repo_limit: must be between 1 and {}",
            MAX_PER_PAGE
        ));
    }

    if github.event_limit == 0 || github.event_limit > MAX_PER_PAGE {
        errors.push(format!(
            "github.event_limit: must be between 1 and {}",
            MAX_PER_PAGE
        ));
    }

    if github.readme_limit > github.repo_limit {
        errors.push("github.readme_limit: must not exceed github.repo_limit".to_string());
    }

    if let Err(e) = parse_duration_field("github.cache_ttl", &github.cache_ttl) {
        errors.push(format!("{:#}", e));
    }

    let narrative = &config.narrative;

    match parse_duration_field("narrative.timeout", &narrative.timeout) {
        Ok(d) if d.is_zero() => errors.push("narrative.timeout: must be non-zero".to_string()),
        Ok(_) => {}
        Err(e) => errors.push(format!("{:#}", e)),
    }

    if narrative.readme_snippet_chars == 0 {
        errors.push("narrative.readme_snippet_chars: must be positive".to_string());
    }

    if let Some(ref model) = narrative.model {
        if model.trim().is_empty() {
            errors.push("narrative.model: must not be empty".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
