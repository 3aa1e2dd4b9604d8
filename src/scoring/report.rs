use serde::{Deserialize, Serialize};

/// Result of scoring one profile. Every field lies in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreReport {
    pub portfolio_score: u8,
    pub technical_depth: u8,
    pub consistency: u8,
    pub impact: u8,
    pub first_impression: u8,
    pub recruiter_score: u8,
}

impl ScoreReport {
    /// Sub-scores paired with display labels, in presentation order
    pub fn components(&self) -> [(&'static str, u8); 5] {
        [
            ("Technical Depth", self.technical_depth),
            ("Consistency", self.consistency),
            ("Impact", self.impact),
            ("First Impression", self.first_impression),
            ("Recruiter", self.recruiter_score),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_snake_case_keys() {
        let report = ScoreReport {
            portfolio_score: 19,
            technical_depth: 12,
            consistency: 0,
            impact: 24,
            first_impression: 0,
            recruiter_score: 50,
        };
        let value = serde_json::to_value(report).unwrap();
        assert_eq!(value["portfolio_score"], 19);
        assert_eq!(value["technical_depth"], 12);
        assert_eq!(value["first_impression"], 0);
        assert_eq!(value["recruiter_score"], 50);
    }

    #[test]
    fn test_components_order() {
        let report = ScoreReport {
            portfolio_score: 0,
            technical_depth: 1,
            consistency: 2,
            impact: 3,
            first_impression: 4,
            recruiter_score: 5,
        };
        let values: Vec<u8> = report.components().iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }
}
