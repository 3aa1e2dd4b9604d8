use anyhow::Result;

/// Normalize user input to a GitHub login.
///
/// Accepts a bare login or a profile URL with or without scheme and trailing
/// slash ("https://github.com/octocat/", "github.com/octocat"). The last path
/// segment is taken as the login.
pub fn extract_username(input: &str) -> Result<String> {
    let cleaned = input.trim().trim_end_matches('/');
    let username = match cleaned.rsplit_once('/') {
        Some((_, last)) => last,
        None => cleaned,
    };

    if username.is_empty() {
        anyhow::bail!("Invalid username or URL provided");
    }

    Ok(username.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_login() {
        assert_eq!(extract_username("octocat").unwrap(), "octocat");
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(extract_username("  octocat  ").unwrap(), "octocat");
    }

    #[test]
    fn test_full_url() {
        assert_eq!(extract_username("https://github.com/octocat").unwrap(), "octocat");
    }

    #[test]
    fn test_trailing_slash() {
        assert_eq!(extract_username("https://github.com/octocat/").unwrap(), "octocat");
        assert_eq!(extract_username("https://github.com/octocat///").unwrap(), "octocat");
    }

    #[test]
    fn test_without_scheme() {
        assert_eq!(extract_username("github.com/octocat").unwrap(), "octocat");
    }

    #[test]
    fn test_repo_url_takes_last_segment() {
        assert_eq!(extract_username("https://github.com/octocat/repo").unwrap(), "repo");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(extract_username("").is_err());
        assert!(extract_username("   ").is_err());
        assert!(extract_username("/").is_err());
    }
}
