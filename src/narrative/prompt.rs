use std::fmt::Write;

use super::NarrativeRequest;

/// Repositories described to the model
const PROMPT_REPOS: usize = 5;

/// Placeholder used when a repository has no README
pub const NO_README: &str = "No README found";

fn snippet(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the recruiter-persona prompt for a profile.
pub fn build_prompt(request: &NarrativeRequest<'_>) -> String {
    let profile = request.profile;

    let mut projects = String::new();
    for repo in request.repositories.iter().take(PROMPT_REPOS) {
        let description = repo
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("No description");
        let readme = request
            .readmes
            .get(&repo.name)
            .map(String::as_str)
            .unwrap_or(NO_README);
        let _ = writeln!(
            projects,
            "Repo: {}\nDesc: {}\nREADME Snippet: {}\n",
            repo.name,
            description,
            snippet(readme, request.snippet_chars)
        );
    }

    format!(
        r#"You are a cynical but fair Senior Tech Recruiter at a top-tier tech firm.
Analyze the following GitHub profile data for an early-career developer.

User: {login}
Bio: {bio}
Public Repos: {repos}
Followers: {followers}

Top Projects:
{projects}
Your task is to provide:
1. A 'Verdict': Shortlist, Maybe, or Hard Pass.
2. 'Personality Type': A 2-3 word clever name (e.g., 'The Weekend Warrior', 'The Template King', 'The Deep Diver').
3. 'Key Strengths': 3 bullet points.
4. 'Red Flags': Any obvious issues (missing descriptions, generic READMEs, inactivity).
5. 'Recruiter Score': A score from 0-100 based on 'Hireability'.
6. 'Actionable Roadmap': 5 specific, slightly bold tips to improve.

Return the result in JSON format ONLY with keys: verdict, personality_type, strengths, red_flags, recruiter_score, roadmap.
Make the tone professional but slightly bold and honest.
"#,
        login = profile.login,
        bio = profile.bio.as_deref().unwrap_or("None"),
        repos = profile.public_repo_count,
        followers = profile.follower_count,
        projects = projects,
    )
}
