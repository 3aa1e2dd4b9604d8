use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter (tracing directive syntax)
pub const LOG_ENV_VAR: &str = "REPOLENS_LOG";

/// Filter used when `REPOLENS_LOG` is unset or invalid
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "repolens=debug,warn"
    } else {
        "warn"
    }
}

/// Install the stderr fmt subscriber. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "warn");
        assert!(default_directive(true).contains("repolens=debug"));
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
    }
}
