use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use repolens::analyze::ProfileAnalysis;
use repolens::config::{Config, ProviderKind};
use repolens::github::{CacheConfig, ResponseCache};
use repolens::narrative::Provider;
use repolens::output::OutputFormat;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one or more GitHub profiles
    Analyze {
        /// Usernames or profile URLs (e.g. octocat, https://github.com/octocat)
        #[arg(required = true)]
        targets: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,

        /// Narrative provider (overrides the config file)
        #[arg(short, long, value_enum)]
        provider: Option<ProviderKind>,

        /// Skip the response cache for this run
        #[arg(long)]
        no_cache: bool,
    },
    /// Open a GitHub profile in the browser
    Open {
        /// Username or profile URL
        target: String,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Remove cached GitHub responses
    ClearCache,
}

#[derive(Parser, Debug)]
#[command(name = "repolens")]
#[command(about = "GitHub developer profile scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and score breakdowns
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/repolens/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    repolens::github::install_crypto_provider();

    let cli = Cli::parse();
    repolens::logging::init(cli.verbose);
    let config_path = cli.config.map(PathBuf::from);

    let code = match cli.command {
        Commands::Analyze {
            targets,
            format,
            provider,
            no_cache,
        } => {
            let config = load_validated_config(config_path);
            run_analyze(config, &targets, format, provider, no_cache, cli.verbose).await
        }
        Commands::Open { target } => run_open(&target),
        Commands::Init { force } => match repolens::config::write_default_config(config_path, force)
        {
            Ok(path) => {
                println!("Wrote default config to {}", path.display());
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                EXIT_CONFIG
            }
        },
        Commands::ClearCache => match repolens::github::clear_cache() {
            Ok(()) => {
                println!("Cache cleared: {}", repolens::github::get_cache_path().display());
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to clear cache: {:#}", e);
                EXIT_INPUT
            }
        },
    };

    std::process::exit(code);
}

/// Load and validate config, exiting with EXIT_CONFIG on any error
fn load_validated_config(path: Option<PathBuf>) -> Config {
    let config = match repolens::config::load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = repolens::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    config
}

async fn run_analyze(
    mut config: Config,
    targets: &[String],
    format: OutputFormat,
    provider: Option<ProviderKind>,
    no_cache: bool,
    verbose: bool,
) -> i32 {
    let start_time = Instant::now();

    let mut logins = Vec::new();
    for target in targets {
        match repolens::github::extract_username(target) {
            Ok(login) if !logins.contains(&login) => logins.push(login),
            Ok(_) => {}
            Err(e) => {
                eprintln!("{}: {:#}", target, e);
                return EXIT_INPUT;
            }
        }
    }

    if let Some(kind) = provider {
        config.narrative.provider = kind;
    }

    let generator = match Provider::from_config(&config.narrative) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };
    tracing::debug!(
        provider = config.narrative.provider.as_str(),
        model = ?generator.model(),
        "narrative provider"
    );

    let ttl = match repolens::config::parse_duration_field("github.cache_ttl", &config.github.cache_ttl)
    {
        Ok(ttl) => ttl,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };
    let cache = ResponseCache::new(
        repolens::github::get_cache_path(),
        CacheConfig {
            enabled: !no_cache,
            ttl,
        },
    );

    let token = repolens::config::secret_from_env(repolens::config::GITHUB_TOKEN_VAR);
    if token.is_none() {
        tracing::debug!("no GITHUB_TOKEN set, using unauthenticated requests");
    }

    let client = match repolens::github::create_client(token.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create GitHub client: {:#}", e);
            return EXIT_NETWORK;
        }
    };
    let http = match repolens::github::create_http_client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {:#}", e);
            return EXIT_NETWORK;
        }
    };

    let (results, failures) = match repolens::analyze::analyze_profiles(
        &client, &http, &cache, &config, &generator, &logins,
    )
    .await
    {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{:#}", e);
            return EXIT_NETWORK;
        }
    };

    for (login, e) in &failures {
        eprintln!("{}: {:#}", login, e);
    }

    let analyses: Vec<&ProfileAnalysis> = results.iter().map(|(_, a)| a).collect();
    let use_colors = repolens::output::should_use_colors();

    match format {
        OutputFormat::Json => match repolens::output::format_json(&analyses) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{:#}", e);
                return EXIT_INPUT;
            }
        },
        OutputFormat::Tsv => println!("{}", repolens::output::format_tsv(&analyses)),
        OutputFormat::Pretty => {
            for (i, (data, analysis)) in results.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{}", repolens::output::format_analysis(analysis, use_colors));
                if verbose {
                    let factors = repolens::scoring::explain_report(
                        &data.profile,
                        &data.repositories,
                        &data.events,
                    );
                    println!();
                    println!("Score breakdown:");
                    println!("{}", repolens::output::format_breakdown(&factors));
                }
            }
            if analyses.len() > 1 {
                println!();
                println!("Ranking:");
                println!("{}", repolens::output::format_ranking(&analyses, use_colors));
            }
        }
    }

    if verbose {
        eprintln!();
        eprintln!(
            "Total: {} profiles ({} failed) in {:?}",
            logins.len(),
            failures.len(),
            start_time.elapsed()
        );
    }

    EXIT_SUCCESS
}

fn run_open(target: &str) -> i32 {
    let login = match repolens::github::extract_username(target) {
        Ok(login) => login,
        Err(e) => {
            eprintln!("{}: {:#}", target, e);
            return EXIT_INPUT;
        }
    };

    if let Err(e) = repolens::browser::open_profile(&login) {
        eprintln!("Failed to open browser: {:#}", e);
        return EXIT_NETWORK;
    }

    println!(
        "Opening {} in browser: {}",
        login,
        repolens::github::types::profile_url_for(&login)
    );
    EXIT_SUCCESS
}
