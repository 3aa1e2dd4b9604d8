pub mod gemini;
pub mod openai;
pub mod prompt;
pub mod response;

pub use gemini::GeminiGenerator;
pub use openai::OpenAiGenerator;
pub use prompt::{build_prompt, NO_README};
pub use response::parse_narrative;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{
    parse_duration_field, secret_from_env, NarrativeConfig, ProviderKind, GEMINI_KEY_VAR,
    OPENAI_KEY_VAR,
};
use crate::github::types::{RepositorySummary, UserProfile};
use crate::scoring::DEFAULT_RECRUITER_SCORE;

/// Qualitative recruiter-style assessment of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    /// "Shortlist", "Maybe" or "Hard Pass"
    #[serde(default, deserialize_with = "response::lenient_text")]
    pub verdict: String,
    #[serde(default, deserialize_with = "response::lenient_text")]
    pub personality_type: String,
    #[serde(default, deserialize_with = "response::lenient_list")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "response::lenient_list")]
    pub red_flags: Vec<String>,
    #[serde(
        default = "default_recruiter_score",
        deserialize_with = "response::lenient_score"
    )]
    pub recruiter_score: u8,
    #[serde(default, deserialize_with = "response::lenient_list")]
    pub roadmap: Vec<String>,
}

fn default_recruiter_score() -> u8 {
    DEFAULT_RECRUITER_SCORE
}

impl Narrative {
    /// Neutral narrative used when the provider call fails
    pub fn fallback(error: &anyhow::Error) -> Self {
        Self {
            verdict: "Maybe".to_string(),
            personality_type: "The Enigma".to_string(),
            strengths: vec!["Data fetching worked".to_string()],
            red_flags: vec![format!("AI analysis failed: {:#}", error)],
            recruiter_score: DEFAULT_RECRUITER_SCORE,
            roadmap: vec!["Fix the API integration".to_string()],
        }
    }

    /// Neutral narrative used when no provider is configured
    pub fn offline() -> Self {
        Self {
            verdict: "Maybe".to_string(),
            personality_type: "The Enigma".to_string(),
            strengths: Vec::new(),
            red_flags: Vec::new(),
            recruiter_score: DEFAULT_RECRUITER_SCORE,
            roadmap: vec!["Enable a narrative provider for a qualitative review".to_string()],
        }
    }
}

/// Everything a provider sees about a profile
#[derive(Debug, Clone, Copy)]
pub struct NarrativeRequest<'a> {
    pub profile: &'a UserProfile,
    /// Most recently updated first
    pub repositories: &'a [RepositorySummary],
    /// README text keyed by repository name
    pub readmes: &'a BTreeMap<String, String>,
    /// README characters per repository included in the prompt
    pub snippet_chars: usize,
}

/// A source of qualitative narratives (an LLM provider or a stand-in).
#[allow(async_fn_in_trait)]
pub trait NarrativeGenerator {
    fn name(&self) -> &'static str;

    async fn generate(&self, request: &NarrativeRequest<'_>) -> Result<Narrative>;
}

/// Provider selected by configuration
#[derive(Debug, Clone)]
pub enum Provider {
    Gemini(GeminiGenerator),
    OpenAi(OpenAiGenerator),
    Offline,
}

impl Provider {
    /// Build the configured provider. API keys come from the environment; a
    /// missing key is reported when the provider is used, not here.
    pub fn from_config(config: &NarrativeConfig) -> Result<Self> {
        if config.provider == ProviderKind::None {
            return Ok(Provider::Offline);
        }

        let timeout = parse_duration_field("narrative.timeout", &config.timeout)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(match config.provider {
            ProviderKind::Gemini => Provider::Gemini(GeminiGenerator::new(
                http,
                secret_from_env(GEMINI_KEY_VAR),
                config.model.clone(),
            )),
            ProviderKind::OpenAi => Provider::OpenAi(OpenAiGenerator::new(
                http,
                secret_from_env(OPENAI_KEY_VAR),
                config.model.clone(),
            )),
            ProviderKind::None => Provider::Offline,
        })
    }

    /// Model in use, if any
    pub fn model(&self) -> Option<&str> {
        match self {
            Provider::Gemini(g) => Some(g.model()),
            Provider::OpenAi(o) => Some(o.model()),
            Provider::Offline => None,
        }
    }
}

impl NarrativeGenerator for Provider {
    fn name(&self) -> &'static str {
        match self {
            Provider::Gemini(g) => g.name(),
            Provider::OpenAi(o) => o.name(),
            Provider::Offline => "none",
        }
    }

    async fn generate(&self, request: &NarrativeRequest<'_>) -> Result<Narrative> {
        match self {
            Provider::Gemini(g) => g.generate(request).await,
            Provider::OpenAi(o) => o.generate(request).await,
            Provider::Offline => Ok(Narrative::offline()),
        }
    }
}

/// Generate a narrative, degrading to `Narrative::fallback` on any error.
pub async fn generate_or_fallback<G: NarrativeGenerator>(
    generator: &G,
    request: &NarrativeRequest<'_>,
) -> Narrative {
    match generator.generate(request).await {
        Ok(narrative) => narrative,
        Err(e) => {
            tracing::warn!(
                provider = generator.name(),
                login = %request.profile.login,
                "narrative generation failed: {:#}",
                e
            );
            Narrative::fallback(&e)
        }
    }
}

/// Fail with a readable message for a non-success provider response
pub(crate) fn check_status(provider: &str, status: http::StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    let detail: String = body.trim().chars().take(200).collect();
    match status {
        http::StatusCode::UNAUTHORIZED | http::StatusCode::FORBIDDEN => {
            anyhow::bail!("{} rejected the API key ({})", provider, status)
        }
        http::StatusCode::TOO_MANY_REQUESTS => {
            anyhow::bail!("{} rate limit exceeded ({})", provider, status)
        }
        _ => anyhow::bail!("{} returned {}: {}", provider, status, detail),
    }
}
