use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::get_config_path;

/// Commented config file matching `Config::default()`.
pub fn default_config_template() -> &'static str {
    r#"# repolens configuration
#
# API keys are read from the environment only:
#   GITHUB_TOKEN    optional, raises the GitHub rate limit
#   GEMINI_API_KEY  used when narrative.provider is gemini
#   OPENAI_API_KEY  used when narrative.provider is openai

github:
  # Repositories listed per profile, most recently updated first (1-100)
  repo_limit: 30
  # Public events fetched per profile (1-100)
  event_limit: 30
  # READMEs fetched for the narrative prompt
  readme_limit: 5
  # How long cached GitHub responses are reused
  cache_ttl: "15m"

narrative:
  # gemini | openai | none
  provider: gemini
  # model: gemini-1.5-flash
  timeout: "30s"
  readme_snippet_chars: 500
"#
}

/// Write the default config file.
///
/// If `path` is None, writes to ~/.config/repolens/config.yaml. Refuses to
/// replace an existing file unless `force` is set. The write is atomic.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let path = path.unwrap_or_else(get_config_path);

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let mut file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(default_config_template().as_bytes())
        .context("Failed to write config file")?;
    file.commit().context("Failed to save config file")?;

    Ok(path)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory at {}", dir.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config, validate_config, Config};
    use std::env;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = serde_saphyr::from_str(default_config_template()).unwrap();
        assert_eq!(config, Config::default());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_write_and_reload() {
        let dir = env::temp_dir().join("repolens_test_init");
        let path = dir.join("config.yaml");
        let _ = std::fs::remove_dir_all(&dir);

        let written = write_default_config(Some(path.clone()), false).unwrap();
        assert_eq!(written, path);

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config, Config::default());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_refuses_overwrite_without_force() {
        let path = env::temp_dir().join("repolens_test_init_existing.yaml");
        std::fs::write(&path, "narrative:\n  provider: none\n").unwrap();

        let result = write_default_config(Some(path.clone()), false);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("--force"));

        write_default_config(Some(path.clone()), true).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("provider: gemini"));

        let _ = std::fs::remove_file(&path);
    }
}
