use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile of a GitHub user, as returned by `GET /users/{login}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub blog: Option<String>, // GitHub sends "" when unset
    #[serde(default, rename = "public_repos")]
    pub public_repo_count: u64,
    #[serde(default, rename = "followers")]
    pub follower_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Profile page on github.com
    pub fn profile_url(&self) -> String {
        self.html_url
            .clone()
            .unwrap_or_else(|| profile_url_for(&self.login))
    }
}

/// Build the github.com profile URL for a login
pub fn profile_url_for(login: &str) -> String {
    format!("https://github.com/{}", login)
}

/// One entry of `GET /users/{login}/repos`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RepositorySummary {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, rename = "size")]
    pub size_kb: u64,
    #[serde(default, rename = "stargazers_count")]
    pub stargazer_count: u64,
    #[serde(default, rename = "forks_count")]
    pub fork_count: u64,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Repository reference embedded in an event payload
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct EventRepo {
    pub name: String,
}

/// One entry of `GET /users/{login}/events`. Only the count of events matters
/// for scoring; the remaining fields are kept for display.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Event {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub repo: Option<EventRepo>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// `GET /repos/{full_name}/readme` metadata; the body is fetched from `download_url`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadmeMeta {
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Most recent activity timestamp across the event list
pub fn last_activity(events: &[Event]) -> Option<DateTime<Utc>> {
    events.iter().filter_map(|e| e.created_at).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_user_profile() {
        let json = r#"{
            "login": "octocat",
            "id": 1,
            "name": "The Octocat",
            "avatar_url": "https://avatars.githubusercontent.com/u/583231",
            "html_url": "https://github.com/octocat",
            "bio": null,
            "location": "San Francisco",
            "company": "@github",
            "blog": "",
            "public_repos": 8,
            "followers": 1200,
            "created_at": "2011-01-25T18:44:36Z"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.name.as_deref(), Some("The Octocat"));
        assert!(profile.bio.is_none());
        assert_eq!(profile.blog.as_deref(), Some(""));
        assert_eq!(profile.public_repo_count, 8);
        assert_eq!(profile.follower_count, 1200);
        assert_eq!(profile.profile_url(), "https://github.com/octocat");
    }

    #[test]
    fn test_parse_repository_summary() {
        let json = r#"{
            "name": "hello-world",
            "full_name": "octocat/hello-world",
            "description": null,
            "language": "Rust",
            "size": 108,
            "stargazers_count": 80,
            "forks_count": 9,
            "fork": false,
            "updated_at": "2024-03-01T10:00:00Z"
        }"#;
        let repo: RepositorySummary = serde_json::from_str(json).unwrap();
        assert_eq!(repo.full_name, "octocat/hello-world");
        assert!(repo.description.is_none());
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert_eq!(repo.size_kb, 108);
        assert_eq!(repo.stargazer_count, 80);
        assert_eq!(repo.fork_count, 9);
    }

    #[test]
    fn test_parse_event() {
        let json = r#"{
            "id": "123",
            "type": "PushEvent",
            "repo": { "id": 1, "name": "octocat/hello-world" },
            "created_at": "2024-03-01T10:00:00Z"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind.as_deref(), Some("PushEvent"));
        assert_eq!(event.repo.unwrap().name, "octocat/hello-world");
    }

    #[test]
    fn test_profile_url_fallback() {
        let profile = UserProfile {
            login: "someone".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.profile_url(), "https://github.com/someone");
    }

    #[test]
    fn test_last_activity() {
        let older = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let newer = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let events = vec![
            Event { created_at: Some(older), ..Default::default() },
            Event { created_at: None, ..Default::default() },
            Event { created_at: Some(newer), ..Default::default() },
        ];
        assert_eq!(last_activity(&events), Some(newer));
        assert_eq!(last_activity(&[]), None);
    }
}
