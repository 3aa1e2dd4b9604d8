pub mod engine;
pub mod report;
pub mod weights;

pub use engine::{
    compute_report, explain_report, portfolio_score, score_consistency, score_first_impression,
    score_impact, score_technical_depth, FactorContribution,
};
pub use report::ScoreReport;
pub use weights::{Weights, DEFAULT_RECRUITER_SCORE, PORTFOLIO_WEIGHTS, SIGNAL_KEYWORDS};
