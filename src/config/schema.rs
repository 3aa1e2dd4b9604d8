use serde::{Deserialize, Serialize};

/// Top-level configuration file.
///
/// Example YAML:
/// ```yaml
/// github:
///   repo_limit: 30
///   event_limit: 30
///   readme_limit: 5
///   cache_ttl: "15m"
/// narrative:
///   provider: openai
///   model: gpt-4o-mini
///   timeout: "30s"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,

    #[serde(default)]
    pub narrative: NarrativeConfig,
}

/// How much data is pulled from GitHub per profile.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GithubConfig {
    /// Repositories listed per profile, most recently updated first
    #[serde(default = "default_repo_limit")]
    pub repo_limit: u32,

    /// Public events fetched per profile
    #[serde(default = "default_event_limit")]
    pub event_limit: u32,

    /// READMEs fetched from the top repositories for the narrative prompt
    #[serde(default = "default_readme_limit")]
    pub readme_limit: u32,

    /// How long cached API responses stay valid (humantime, e.g. "15m")
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            repo_limit: default_repo_limit(),
            event_limit: default_event_limit(),
            readme_limit: default_readme_limit(),
            cache_ttl: default_cache_ttl(),
        }
    }
}

/// LLM provider used for the qualitative narrative.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    #[value(name = "openai")]
    OpenAi,
    /// No LLM call; neutral narrative
    None,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
            ProviderKind::None => "none",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NarrativeConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    /// Model override; each provider has its own default
    #[serde(default)]
    pub model: Option<String>,

    /// Request timeout for the provider call (humantime, e.g. "30s")
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// README characters included per repository in the prompt
    #[serde(default = "default_readme_snippet_chars")]
    pub readme_snippet_chars: usize,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: None,
            timeout: default_timeout(),
            readme_snippet_chars: default_readme_snippet_chars(),
        }
    }
}

fn default_repo_limit() -> u32 {
    30
}

fn default_event_limit() -> u32 {
    30
}

fn default_readme_limit() -> u32 {
    5
}

fn default_cache_ttl() -> String {
    "15m".to_string()
}

fn default_timeout() -> String {
    "30s".to_string()
}

fn default_readme_snippet_chars() -> usize {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_names_match_yaml() {
        for kind in [ProviderKind::Gemini, ProviderKind::OpenAi, ProviderKind::None] {
            let yaml = format!("provider: {}\n", kind.as_str());
            let config: NarrativeConfig = serde_saphyr::from_str(&yaml).unwrap();
            assert_eq!(config.provider, kind);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github.repo_limit, 30);
        assert_eq!(config.github.event_limit, 30);
        assert_eq!(config.github.readme_limit, 5);
        assert_eq!(config.github.cache_ttl, "15m");
        assert_eq!(config.narrative.provider, ProviderKind::Gemini);
        assert!(config.narrative.model.is_none());
        assert_eq!(config.narrative.readme_snippet_chars, 500);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = r#"
narrative:
  provider: openai
  model: gpt-4o
github:
  repo_limit: 50
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.narrative.provider, ProviderKind::OpenAi);
        assert_eq!(config.narrative.model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.narrative.timeout, "30s");
        assert_eq!(config.github.repo_limit, 50);
        assert_eq!(config.github.event_limit, 30);
    }

    #[test]
    fn test_provider_none_parse() {
        let yaml = r#"
narrative:
  provider: none
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.narrative.provider, ProviderKind::None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
github:
  repos: 10
"#;
        let result: Result<Config, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
