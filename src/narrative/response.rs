use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::Narrative;
use crate::scoring::DEFAULT_RECRUITER_SCORE;

/// Parse a provider's text reply into a narrative.
///
/// Tolerates markdown code fences and prose around the JSON object. Missing
/// fields get neutral defaults.
pub fn parse_narrative(text: &str) -> Result<Narrative> {
    let json = extract_json_object(text).context("Provider reply contained no JSON object")?;
    let mut narrative: Narrative =
        serde_json::from_str(json).context("Provider reply is not a valid narrative")?;

    if narrative.verdict.trim().is_empty() {
        narrative.verdict = "Maybe".to_string();
    }
    Ok(narrative)
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Read a 0..=100 score from a number or numeric string.
/// Fractions are truncated; anything unusable becomes the default score.
pub fn score_from_value(value: &Value) -> u8 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches("/100").trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(x) if x.is_finite() => x.trunc().clamp(0.0, 100.0) as u8,
        _ => DEFAULT_RECRUITER_SCORE,
    }
}

pub(super) fn lenient_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(score_from_value(&value))
}

pub(super) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Accept a list of strings, a single string, or null
pub(super) fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        Value::String(s) => vec![s],
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FULL_REPLY: &str = r#"{
        "verdict": "Shortlist",
        "personality_type": "The Deep Diver",
        "strengths": ["Systems work", "Clear READMEs", "Tests"],
        "red_flags": ["Few stars"],
        "recruiter_score": 78,
        "roadmap": ["Pin your best repos", "Write a blog post"]
    }"#;

    #[test]
    fn test_parse_full_reply() {
        let narrative = parse_narrative(FULL_REPLY).unwrap();
        assert_eq!(narrative.verdict, "Shortlist");
        assert_eq!(narrative.personality_type, "The Deep Diver");
        assert_eq!(narrative.strengths.len(), 3);
        assert_eq!(narrative.red_flags, vec!["Few stars"]);
        assert_eq!(narrative.recruiter_score, 78);
        assert_eq!(narrative.roadmap.len(), 2);
    }

    #[test]
    fn test_parse_fenced_reply() {
        let text = format!("```json\n{}\n```", FULL_REPLY);
        let narrative = parse_narrative(&text).unwrap();
        assert_eq!(narrative.recruiter_score, 78);
    }

    #[test]
    fn test_parse_reply_with_prose() {
        let text = format!("Here is my analysis:\n{}\nGood luck!", FULL_REPLY);
        assert!(parse_narrative(&text).is_ok());
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let narrative = parse_narrative(r#"{"strengths": "Consistent commits"}"#).unwrap();
        assert_eq!(narrative.verdict, "Maybe");
        assert_eq!(narrative.recruiter_score, 50);
        assert_eq!(narrative.strengths, vec!["Consistent commits"]);
        assert!(narrative.red_flags.is_empty());
        assert!(narrative.roadmap.is_empty());
    }

    #[test]
    fn test_null_fields() {
        let narrative =
            parse_narrative(r#"{"verdict": null, "recruiter_score": null, "roadmap": null}"#).unwrap();
        assert_eq!(narrative.verdict, "Maybe");
        assert_eq!(narrative.recruiter_score, 50);
        assert!(narrative.roadmap.is_empty());
    }

    #[test]
    fn test_not_json_fails() {
        assert!(parse_narrative("I cannot help with that.").is_err());
        assert!(parse_narrative("} backwards {").is_err());
        assert!(parse_narrative("{ not json }").is_err());
    }

    #[test]
    fn test_score_from_value() {
        assert_eq!(score_from_value(&json!(72)), 72);
        assert_eq!(score_from_value(&json!(72.9)), 72);
        assert_eq!(score_from_value(&json!("64")), 64);
        assert_eq!(score_from_value(&json!("85/100")), 85);
        assert_eq!(score_from_value(&json!(150)), 100);
        assert_eq!(score_from_value(&json!(-5)), 0);
        assert_eq!(score_from_value(&json!("high")), 50);
        assert_eq!(score_from_value(&json!(null)), 50);
        assert_eq!(score_from_value(&json!([1])), 50);
    }
}
