use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::config::Config;
use crate::github::types::{last_activity, Event, RepositorySummary, UserProfile};
use crate::github::{self, ResponseCache};
use crate::narrative::{generate_or_fallback, Narrative, NarrativeGenerator, NarrativeRequest};
use crate::scoring::{compute_report, ScoreReport};

/// Concurrent README downloads per profile
const MAX_CONCURRENT_READMES: usize = 5;

/// Concurrent profile analyses in `analyze_profiles`
const MAX_CONCURRENT_PROFILES: usize = 4;

/// Placeholder stored for fetched repositories without a README. Differs from
/// `narrative::NO_README`, which marks repositories past `readme_limit`.
pub const MISSING_README: &str = "No README";

/// Public identity shown alongside the scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub login: String,
    pub profile_url: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

impl From<&UserProfile> for UserSummary {
    fn from(profile: &UserProfile) -> Self {
        Self {
            login: profile.login.clone(),
            profile_url: profile.profile_url(),
            name: profile.name.clone(),
            avatar_url: profile.avatar_url.clone(),
            bio: profile.bio.clone(),
            location: profile.location.clone(),
        }
    }
}

/// Scores merged with the narrative for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    pub user: UserSummary,
    pub scores: ScoreReport,
    pub analysis: Narrative,
    pub last_activity: Option<DateTime<Utc>>,
    pub analyzed_at: DateTime<Utc>,
}

/// Raw GitHub data for one profile, fully materialized
#[derive(Debug, Clone)]
pub struct ProfileData {
    pub profile: UserProfile,
    /// Most recently updated first
    pub repositories: Vec<RepositorySummary>,
    pub events: Vec<Event>,
    /// README text keyed by repository name
    pub readmes: BTreeMap<String, String>,
}

/// Fetch profile, repositories and events concurrently, then the READMEs of
/// the top repositories.
pub async fn fetch_profile_data(
    client: &Octocrab,
    http: &reqwest::Client,
    cache: &ResponseCache,
    config: &Config,
    login: &str,
) -> Result<ProfileData> {
    let start = Instant::now();
    let limits = &config.github;

    let (profile, repositories, events) = tokio::try_join!(
        github::fetch_profile(client, cache, login),
        github::fetch_repositories(client, cache, login, limits.repo_limit),
        github::fetch_events(client, cache, login, limits.event_limit),
    )?;

    tracing::debug!(
        login,
        repos = repositories.len(),
        events = events.len(),
        elapsed = ?start.elapsed(),
        "fetched profile data"
    );

    let readmes = fetch_readmes(client, http, &repositories, limits.readme_limit as usize).await;

    Ok(ProfileData {
        profile,
        repositories,
        events,
        readmes,
    })
}

/// Fetch READMEs for the first `limit` repositories with bounded concurrency.
/// Missing READMEs are recorded as `MISSING_README`.
async fn fetch_readmes(
    client: &Octocrab,
    http: &reqwest::Client,
    repositories: &[RepositorySummary],
    limit: usize,
) -> BTreeMap<String, String> {
    let mut readmes = BTreeMap::new();
    let mut futures = FuturesUnordered::new();
    let mut repos_iter = repositories.iter().take(limit);

    let fetch = |repo: &RepositorySummary| {
        let name = repo.name.clone();
        let full_name = repo.full_name.clone();
        async move {
            let readme = github::fetch_readme(client, http, &full_name).await;
            (name, readme)
        }
    };

    // Fill initial batch
    for repo in repos_iter.by_ref().take(MAX_CONCURRENT_READMES) {
        futures.push(fetch(repo));
    }

    // Process results and feed new tasks
    while let Some((name, readme)) = futures.next().await {
        readmes.insert(name, readme.unwrap_or_else(|| MISSING_README.to_string()));
        if let Some(next) = repos_iter.next() {
            futures.push(fetch(next));
        }
    }

    readmes
}

/// Score fetched data and attach the narrative
pub async fn analyze_data<G: NarrativeGenerator>(
    data: &ProfileData,
    generator: &G,
    snippet_chars: usize,
) -> ProfileAnalysis {
    let request = NarrativeRequest {
        profile: &data.profile,
        repositories: &data.repositories,
        readmes: &data.readmes,
        snippet_chars,
    };
    let narrative = generate_or_fallback(generator, &request).await;

    let scores = compute_report(
        &data.profile,
        &data.repositories,
        &data.events,
        narrative.recruiter_score,
    );

    ProfileAnalysis {
        user: UserSummary::from(&data.profile),
        scores,
        analysis: narrative,
        last_activity: last_activity(&data.events),
        analyzed_at: Utc::now(),
    }
}

/// Fetch, score and narrate one profile
pub async fn analyze_profile<G: NarrativeGenerator>(
    client: &Octocrab,
    http: &reqwest::Client,
    cache: &ResponseCache,
    config: &Config,
    generator: &G,
    login: &str,
) -> Result<(ProfileData, ProfileAnalysis)> {
    let data = fetch_profile_data(client, http, cache, config, login).await?;
    let analysis = analyze_data(&data, generator, config.narrative.readme_snippet_chars).await;
    Ok((data, analysis))
}

/// Analyze several profiles, at most `MAX_CONCURRENT_PROFILES` at a time.
///
/// Returns successful analyses ranked by portfolio score (descending, ties by
/// login) and the failures as (login, error) pairs. Fails only if every
/// profile failed.
pub async fn analyze_profiles<G: NarrativeGenerator>(
    client: &Octocrab,
    http: &reqwest::Client,
    cache: &ResponseCache,
    config: &Config,
    generator: &G,
    logins: &[String],
) -> Result<(Vec<(ProfileData, ProfileAnalysis)>, Vec<(String, anyhow::Error)>)> {
    let mut futures = FuturesUnordered::new();
    let mut logins_iter = logins.iter();

    let run = |login: &String| {
        let login = login.clone();
        async move {
            let result = analyze_profile(client, http, cache, config, generator, &login).await;
            (login, result)
        }
    };

    for login in logins_iter.by_ref().take(MAX_CONCURRENT_PROFILES) {
        futures.push(run(login));
    }

    let mut analyses = Vec::new();
    let mut failures = Vec::new();
    while let Some((login, result)) = futures.next().await {
        match result {
            Ok(analysis) => analyses.push(analysis),
            Err(e) => {
                tracing::warn!(login = %login, "analysis failed: {:#}", e);
                failures.push((login, e));
            }
        }
        if let Some(next) = logins_iter.next() {
            futures.push(run(next));
        }
    }

    if analyses.is_empty() && !logins.is_empty() {
        let summary = failures
            .iter()
            .map(|(login, e)| format!("{}: {:#}", login, e))
            .collect::<Vec<_>>()
            .join("; ");
        anyhow::bail!("All profiles failed. {}", summary);
    }

    rank_analyses(&mut analyses);
    Ok((analyses, failures))
}

/// Sort by portfolio score descending, then login ascending
pub fn rank_analyses<T>(analyses: &mut [(T, ProfileAnalysis)]) {
    analyses.sort_by(|a, b| {
        b.1.scores
            .portfolio_score
            .cmp(&a.1.scores.portfolio_score)
            .then_with(|| a.1.user.login.cmp(&b.1.user.login))
    });
}
