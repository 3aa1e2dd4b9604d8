/// Aggregate weights for the portfolio score.
///
/// These values are hand-tuned and must stay exactly as they are: scores
/// produced by earlier versions are compared against new ones.
pub const PORTFOLIO_WEIGHTS: Weights = Weights {
    technical_depth: 0.20,
    consistency: 0.15,
    impact: 0.20,
    first_impression: 0.20,
    recruiter: 0.25,
};

/// Keywords in a repository description that count as production/impact signal.
/// Matched as lower-case substrings, so "ux" also matches "linux".
pub const SIGNAL_KEYWORDS: [&str; 8] = [
    "api",
    "deployment",
    "production",
    "scalable",
    "ux",
    "database",
    "cloud",
    "optimized",
];

/// Recruiter score used when the narrative provider cannot supply one
pub const DEFAULT_RECRUITER_SCORE: u8 = 50;

/// Upper bound of every score
pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub technical_depth: f64,
    pub consistency: f64,
    pub impact: f64,
    pub first_impression: f64,
    pub recruiter: f64,
}
