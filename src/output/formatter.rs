use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::analyze::ProfileAnalysis;
use crate::scoring::FactorContribution;

const LABEL_WIDTH: usize = 18;
const DEFAULT_BAR_WIDTH: usize = 30;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 40;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Bar width for the current terminal, leaving room for label and value
fn bar_width() -> usize {
    match get_terminal_width() {
        Some(width) => width
            .saturating_sub(LABEL_WIDTH + 8)
            .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH),
        None => DEFAULT_BAR_WIDTH,
    }
}

/// How a score or verdict should be colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Fair,
    Poor,
}

pub fn score_tone(value: u8) -> Tone {
    if value >= 70 {
        Tone::Good
    } else if value >= 40 {
        Tone::Fair
    } else {
        Tone::Poor
    }
}

pub fn verdict_tone(verdict: &str) -> Tone {
    match verdict.trim().to_lowercase().as_str() {
        "shortlist" => Tone::Good,
        "maybe" => Tone::Fair,
        _ => Tone::Poor,
    }
}

fn paint(text: &str, tone: Tone, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match tone {
        Tone::Good => text.green().to_string(),
        Tone::Fair => text.yellow().to_string(),
        Tone::Poor => text.red().to_string(),
    }
}

/// Render one score as a labelled bar, e.g. "Impact            ██████░░░░  60"
pub fn format_score_bar(label: &str, value: u8, width: usize, use_colors: bool) -> String {
    let value = value.min(100);
    let filled = (value as usize * width + 50) / 100;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(width - filled));

    format!(
        "{:<label_width$}{}  {:>3}",
        label,
        paint(&bar, score_tone(value), use_colors),
        value,
        label_width = LABEL_WIDTH
    )
}

fn format_list(title: &str, items: &[String], numbered: bool, use_colors: bool) -> Vec<String> {
    if items.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new()];
    lines.push(if use_colors {
        title.bold().to_string()
    } else {
        title.to_string()
    });
    for (i, item) in items.iter().enumerate() {
        if numbered {
            lines.push(format!("  {}. {}", i + 1, item));
        } else {
            lines.push(format!("  - {}", item));
        }
    }
    lines
}

/// Format a full report for one profile
pub fn format_analysis(analysis: &ProfileAnalysis, use_colors: bool) -> String {
    let user = &analysis.user;
    let scores = &analysis.scores;
    let narrative = &analysis.analysis;
    let mut lines = Vec::new();

    let heading = match user.name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => format!("{} ({})", user.login, name),
        None => user.login.clone(),
    };
    lines.push(if use_colors {
        heading.bold().to_string()
    } else {
        heading
    });

    lines.push(format!("  Profile: {}", user.profile_url));
    if let Some(location) = user.location.as_deref().filter(|l| !l.is_empty()) {
        lines.push(format!("  Location: {}", location));
    }
    if let Some(bio) = user.bio.as_deref().filter(|b| !b.is_empty()) {
        lines.push(format!("  Bio: {}", bio));
    }
    let activity = match analysis.last_activity {
        Some(at) => format!("{} ago", format_age(Utc::now() - at)),
        None => "none in the last 90 days".to_string(),
    };
    lines.push(format!("  Last activity: {}", activity));

    lines.push(String::new());
    let portfolio = scores.portfolio_score.to_string();
    lines.push(format!(
        "Portfolio Score: {}/100",
        paint(&portfolio, score_tone(scores.portfolio_score), use_colors)
    ));
    lines.push(format!(
        "Verdict: {}",
        paint(&narrative.verdict, verdict_tone(&narrative.verdict), use_colors)
    ));
    if !narrative.personality_type.is_empty() {
        lines.push(format!("Personality: {}", narrative.personality_type));
    }

    lines.push(String::new());
    let width = bar_width();
    for (label, value) in scores.components() {
        lines.push(format_score_bar(label, value, width, use_colors));
    }

    lines.extend(format_list("Strengths", &narrative.strengths, false, use_colors));
    lines.extend(format_list("Red Flags", &narrative.red_flags, false, use_colors));
    lines.extend(format_list("Roadmap", &narrative.roadmap, true, use_colors));

    lines.join("\n")
}

/// Format the itemized score contributions (verbose mode)
pub fn format_breakdown(factors: &[FactorContribution]) -> String {
    let mut lines = Vec::new();
    let mut current = "";
    for factor in factors {
        if factor.score != current {
            current = factor.score;
            lines.push(format!("  {}:", current));
        }
        lines.push(format!(
            "    {:<16} {:>5.1}  {}",
            factor.label, factor.points, factor.description
        ));
    }
    lines.join("\n")
}

/// Format several profiles as a ranked table: index, score, verdict, login
pub fn format_ranking(analyses: &[&ProfileAnalysis], use_colors: bool) -> String {
    if analyses.is_empty() {
        return "No profiles analyzed.".to_string();
    }

    analyses
        .iter()
        .enumerate()
        .map(|(idx, analysis)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!("{:>3}", analysis.scores.portfolio_score);
            let verdict = format!("{:<10}", analysis.analysis.verdict);
            if use_colors {
                format!(
                    "{} {}  {}  {}",
                    index_str.dimmed(),
                    score_str.bold(),
                    paint(&verdict, verdict_tone(&analysis.analysis.verdict), true),
                    analysis.user.login
                )
            } else {
                format!("{} {}  {}  {}", index_str, score_str, verdict, analysis.user.login)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty JSON: a single object for one profile, an array otherwise
pub fn format_json(analyses: &[&ProfileAnalysis]) -> Result<String> {
    let json = match analyses {
        [single] => serde_json::to_string_pretty(single),
        many => serde_json::to_string_pretty(many),
    };
    json.context("Failed to serialize analysis")
}

/// Format profiles as tab-separated values for scripting.
/// Columns: login, portfolio, technical_depth, consistency, impact,
/// first_impression, recruiter, verdict (no headers, no colors)
pub fn format_tsv(analyses: &[&ProfileAnalysis]) -> String {
    analyses
        .iter()
        .map(|a| {
            let s = &a.scores;
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                a.user.login,
                s.portfolio_score,
                s.technical_depth,
                s.consistency,
                s.impact,
                s.first_impression,
                s.recruiter_score,
                a.analysis.verdict
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}
