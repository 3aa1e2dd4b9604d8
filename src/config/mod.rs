mod init;
mod schema;
mod validation;

pub use init::{default_config_template, write_default_config};
pub use schema::{Config, GithubConfig, NarrativeConfig, ProviderKind};
pub use validation::{parse_duration_field, validate_config};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Environment variable holding an optional GitHub token
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Environment variable holding the OpenAI API key
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable holding the Gemini API key
pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";

/// Get the config directory path (~/.config/repolens/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from(std::env::var("HOME").unwrap_or_default()))
        .join(".config")
        .join("repolens")
}

/// Get the default config file path (~/.config/repolens/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Read a secret from the environment.
/// Returns Some(value) if the variable is set and non-empty, None otherwise.
pub fn secret_from_env(var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(val) => {
            let trimmed = val.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/repolens/config.yaml) and falls back to defaults when it is missing.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let path = env::temp_dir().join("repolens_test_missing_config.yaml");
        let _ = fs::remove_file(&path);
        let result = load_config(Some(path));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_config_from_file() {
        let path = env::temp_dir().join("repolens_test_load_config.yaml");
        fs::write(&path, "narrative:\n  provider: none\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.narrative.provider, ProviderKind::None);
        assert_eq!(config.github, GithubConfig::default());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let path = env::temp_dir().join("repolens_test_invalid_config.yaml");
        fs::write(&path, "github: [unclosed\n").unwrap();

        let result = load_config(Some(path.clone()));
        assert!(result.is_err());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_secret_from_env_ignores_blank() {
        let var = "REPOLENS_TEST_BLANK_SECRET";
        env::set_var(var, "   ");
        assert_eq!(secret_from_env(var), None);
        env::set_var(var, " abc ");
        assert_eq!(secret_from_env(var), Some("abc".to_string()));
        env::remove_var(var);
        assert_eq!(secret_from_env(var), None);
    }
}
