pub mod formatter;

pub use formatter::{
    format_age, format_analysis, format_breakdown, format_json, format_ranking, format_score_bar,
    format_tsv, should_use_colors,
};

/// Output format for `analyze`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report per profile
    #[default]
    Pretty,
    /// Pretty-printed JSON
    Json,
    /// Tab-separated scores, one line per profile
    Tsv,
}
