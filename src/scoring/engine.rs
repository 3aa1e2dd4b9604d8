use std::collections::HashSet;

use super::report::ScoreReport;
use super::weights::{MAX_SCORE, PORTFOLIO_WEIGHTS, SIGNAL_KEYWORDS};
use crate::github::types::{Event, RepositorySummary, UserProfile};

const LANGUAGE_POINTS: u64 = 10;
const LANGUAGE_CAP: u64 = 40;
const VOLUME_POINTS: u64 = 2;
const VOLUME_CAP: u64 = 40;
const LARGE_SIZE_KB: u64 = 10_000;
const MEDIUM_SIZE_KB: u64 = 1_000;

const EVENT_POINTS: u64 = 2;

const STAR_POINTS: u64 = 4;
const STAR_CAP: u64 = 40;
const FORK_POINTS: u64 = 8;
const FORK_CAP: u64 = 20;
const SIGNAL_SAMPLE: usize = 10;
const SIGNAL_POINTS: u64 = 4;
const SIGNAL_CAP: u64 = 40;

const DESCRIPTION_SAMPLE: usize = 5;
const DESCRIPTION_POINTS: f64 = 30.0;

/// One line of a score explanation, e.g. "Impact: stars -> 12".
#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub score: &'static str, // e.g. "Technical Depth"
    pub label: String,       // e.g. "Languages"
    pub description: String, // e.g. "3 distinct x10 (max 40)"
    pub points: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TechnicalDepthParts {
    languages: usize,
    language_score: u64,
    volume_score: u64,
    total_size_kb: u64,
    size_bonus: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ImpactParts {
    stars: u64,
    star_score: u64,
    forks: u64,
    fork_score: u64,
    signal_repos: usize,
    signal_score: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct FirstImpressionParts {
    bio: f64,
    identity: f64,
    described_repos: usize,
    description_coverage: f64,
    location: f64,
    company: f64,
    blog: f64,
}

impl FirstImpressionParts {
    // Summation order is part of the result (float rounding).
    fn total(&self) -> f64 {
        let mut score = 0.0;
        score += self.bio;
        score += self.identity;
        score += self.description_coverage;
        score += self.location;
        score += self.company;
        score += self.blog;
        score
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

fn clamp_score(value: u64) -> u8 {
    value.min(MAX_SCORE as u64) as u8
}

fn technical_depth_parts(repositories: &[RepositorySummary]) -> TechnicalDepthParts {
    let languages: HashSet<&str> = repositories
        .iter()
        .filter_map(|r| r.language.as_deref())
        .filter(|l| !l.is_empty())
        .collect();
    let total_size_kb = repositories
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.size_kb));

    let size_bonus = if total_size_kb > LARGE_SIZE_KB {
        20
    } else if total_size_kb > MEDIUM_SIZE_KB {
        10
    } else {
        0
    };

    TechnicalDepthParts {
        languages: languages.len(),
        language_score: (languages.len() as u64)
            .saturating_mul(LANGUAGE_POINTS)
            .min(LANGUAGE_CAP),
        volume_score: (repositories.len() as u64)
            .saturating_mul(VOLUME_POINTS)
            .min(VOLUME_CAP),
        total_size_kb,
        size_bonus,
    }
}

/// Breadth and volume of work: distinct languages, repository count and total size.
pub fn score_technical_depth(repositories: &[RepositorySummary]) -> u8 {
    if repositories.is_empty() {
        return 0;
    }
    let parts = technical_depth_parts(repositories);
    clamp_score(parts.language_score + parts.volume_score + parts.size_bonus)
}

/// Recent public activity. The event list is already bounded by GitHub's
/// retention window, so no date filtering happens here.
pub fn score_consistency(events: &[Event]) -> u8 {
    if events.is_empty() {
        return 0;
    }
    clamp_score((events.len() as u64).saturating_mul(EVENT_POINTS))
}

fn has_signal_keyword(description: Option<&str>) -> bool {
    let description = description.unwrap_or_default().to_lowercase();
    SIGNAL_KEYWORDS.iter().any(|kw| description.contains(kw))
}

fn impact_parts(repositories: &[RepositorySummary]) -> ImpactParts {
    let stars = repositories
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.stargazer_count));
    let forks = repositories
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.fork_count));
    let signal_repos = repositories
        .iter()
        .take(SIGNAL_SAMPLE)
        .filter(|r| has_signal_keyword(r.description.as_deref()))
        .count();

    ImpactParts {
        stars,
        star_score: stars.saturating_mul(STAR_POINTS).min(STAR_CAP),
        forks,
        fork_score: forks.saturating_mul(FORK_POINTS).min(FORK_CAP),
        signal_repos,
        signal_score: (signal_repos as u64)
            .saturating_mul(SIGNAL_POINTS)
            .min(SIGNAL_CAP),
    }
}

/// Community reach (stars, forks) plus production-oriented keywords in the
/// descriptions of the ten most recently updated repositories.
pub fn score_impact(repositories: &[RepositorySummary]) -> u8 {
    if repositories.is_empty() {
        return 0;
    }
    let parts = impact_parts(repositories);
    clamp_score(parts.star_score + parts.fork_score + parts.signal_score)
}

fn first_impression_parts(
    profile: &UserProfile,
    repositories: &[RepositorySummary],
) -> FirstImpressionParts {
    let flag = |present: bool, points: f64| if present { points } else { 0.0 };

    let described_repos = repositories
        .iter()
        .take(DESCRIPTION_SAMPLE)
        .filter(|r| is_present(r.description.as_deref()))
        .count();

    FirstImpressionParts {
        bio: flag(is_present(profile.bio.as_deref()), 20.0),
        identity: flag(
            is_present(profile.avatar_url.as_deref()) && is_present(profile.name.as_deref()),
            20.0,
        ),
        described_repos,
        // Divisor is fixed: fewer than five repositories caps this below 30.
        description_coverage: (described_repos as f64 / DESCRIPTION_SAMPLE as f64)
            * DESCRIPTION_POINTS,
        location: flag(is_present(profile.location.as_deref()), 10.0),
        company: flag(is_present(profile.company.as_deref()), 10.0),
        blog: flag(is_present(profile.blog.as_deref()), 10.0),
    }
}

/// How complete the profile looks to a first-time visitor.
pub fn score_first_impression(profile: &UserProfile, repositories: &[RepositorySummary]) -> u8 {
    let total = first_impression_parts(profile, repositories).total();
    // Truncates toward zero.
    total.min(MAX_SCORE as f64) as u8
}

/// Weighted aggregate of the four sub-scores and the recruiter score, floored.
pub fn portfolio_score(
    technical_depth: u8,
    consistency: u8,
    impact: u8,
    first_impression: u8,
    recruiter_score: u8,
) -> u8 {
    let w = PORTFOLIO_WEIGHTS;
    let raw = technical_depth as f64 * w.technical_depth
        + consistency as f64 * w.consistency
        + impact as f64 * w.impact
        + first_impression as f64 * w.first_impression
        + recruiter_score as f64 * w.recruiter;
    raw.floor().clamp(0.0, MAX_SCORE as f64) as u8
}

/// Score a profile. `recruiter_score` comes from the narrative provider and is
/// clamped to 0..=100 before use.
pub fn compute_report(
    profile: &UserProfile,
    repositories: &[RepositorySummary],
    events: &[Event],
    recruiter_score: u8,
) -> ScoreReport {
    let technical_depth = score_technical_depth(repositories);
    let consistency = score_consistency(events);
    let impact = score_impact(repositories);
    let first_impression = score_first_impression(profile, repositories);
    let recruiter_score = recruiter_score.min(MAX_SCORE);

    ScoreReport {
        portfolio_score: portfolio_score(
            technical_depth,
            consistency,
            impact,
            first_impression,
            recruiter_score,
        ),
        technical_depth,
        consistency,
        impact,
        first_impression,
        recruiter_score,
    }
}

/// Itemized contributions behind each sub-score, for verbose output.
pub fn explain_report(
    profile: &UserProfile,
    repositories: &[RepositorySummary],
    events: &[Event],
) -> Vec<FactorContribution> {
    let mut factors = Vec::new();

    if !repositories.is_empty() {
        let td = technical_depth_parts(repositories);
        factors.push(FactorContribution {
            score: "Technical Depth",
            label: "Languages".to_string(),
            description: format!("{} distinct x{} (max {})", td.languages, LANGUAGE_POINTS, LANGUAGE_CAP),
            points: td.language_score as f64,
        });
        factors.push(FactorContribution {
            score: "Technical Depth",
            label: "Volume".to_string(),
            description: format!("{} repos x{} (max {})", repositories.len(), VOLUME_POINTS, VOLUME_CAP),
            points: td.volume_score as f64,
        });
        factors.push(FactorContribution {
            score: "Technical Depth",
            label: "Size".to_string(),
            description: format!("{} KB total", td.total_size_kb),
            points: td.size_bonus as f64,
        });
    }

    factors.push(FactorContribution {
        score: "Consistency",
        label: "Events".to_string(),
        description: format!("{} recent events x{} (max 100)", events.len(), EVENT_POINTS),
        points: score_consistency(events) as f64,
    });

    if !repositories.is_empty() {
        let im = impact_parts(repositories);
        factors.push(FactorContribution {
            score: "Impact",
            label: "Stars".to_string(),
            description: format!("{} stars x{} (max {})", im.stars, STAR_POINTS, STAR_CAP),
            points: im.star_score as f64,
        });
        factors.push(FactorContribution {
            score: "Impact",
            label: "Forks".to_string(),
            description: format!("{} forks x{} (max {})", im.forks, FORK_POINTS, FORK_CAP),
            points: im.fork_score as f64,
        });
        factors.push(FactorContribution {
            score: "Impact",
            label: "Signals".to_string(),
            description: format!(
                "{} of first {} descriptions mention impact keywords",
                im.signal_repos,
                repositories.len().min(SIGNAL_SAMPLE)
            ),
            points: im.signal_score as f64,
        });
    }

    let fi = first_impression_parts(profile, repositories);
    let profile_fields = [
        ("Bio", fi.bio),
        ("Avatar and name", fi.identity),
        ("Location", fi.location),
        ("Company", fi.company),
        ("Blog", fi.blog),
    ];
    for (label, points) in profile_fields {
        factors.push(FactorContribution {
            score: "First Impression",
            label: label.to_string(),
            description: if points > 0.0 { "present" } else { "missing" }.to_string(),
            points,
        });
    }
    factors.push(FactorContribution {
        score: "First Impression",
        label: "Descriptions".to_string(),
        description: format!("{} of {} top repos described", fi.described_repos, DESCRIPTION_SAMPLE),
        points: fi.description_coverage,
    });

    factors
}
