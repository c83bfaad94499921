use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::analysis::AnalysisResult;

static JSON_FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)```json\s*(\{.*?\})\s*```").expect("valid json fence regex")
});

static BRACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid brace regex"));

pub fn parse_llm_response(response: &str) -> Result<AnalysisResult> {
    let value = extract_json(response)?;
    AnalysisResult::from_value(value)
}

/// Pulls a JSON value out of free-form model output.
///
/// Strategies, first success wins:
/// 1. the body of the first ```` ```json ```` fence
/// 2. the whole text
/// 3. the span from the first `{` to the last `}`
pub fn extract_json(text: &str) -> Result<Value> {
    if let Some(captures) = JSON_FENCE_RE.captures(text) {
        match serde_json::from_str::<Value>(&captures[1]) {
            Ok(value) => return Ok(value),
            Err(e) => tracing::debug!("Fenced JSON block did not parse: {}", e),
        }
    }

    if let Ok(value) = serde_json::from_str::<Value>(text.trim()) {
        return Ok(value);
    }

    if let Some(span) = BRACE_RE.find(text) {
        return serde_json::from_str(span.as_str()).map_err(|e| {
            Error::ParseError(format!("Failed to parse JSON from LLM output: {}", e))
        });
    }

    Err(Error::ParseError(
        "No JSON object found in LLM output".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_json_from_markdown() {
        let input = r#"Here's the analysis:
```json
{"a":1}
```
Hope this helps!"#;
        assert_eq!(extract_json(input).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_fence_tag_is_case_insensitive() {
        let input = "```JSON\n{\"a\": 2}\n```";
        assert_eq!(extract_json(input).unwrap(), json!({"a": 2}));
    }

    #[test]
    fn test_fence_wins_over_other_objects() {
        let input = "Draft: {\"draft\": true}\n```json\n{\"final\": true}\n```";
        assert_eq!(extract_json(input).unwrap(), json!({"final": true}));
    }

    #[test]
    fn test_extract_raw_json() {
        let input = "  {\"overview\": [\"x\"], \"roadmap\": []}\n";
        assert_eq!(
            extract_json(input).unwrap(),
            json!({"overview": ["x"], "roadmap": []})
        );
    }

    #[test]
    fn test_extract_embedded_json() {
        let input = r#"The result is {"pain_points": [{"id": "pp_1"}]} as requested."#;
        assert_eq!(
            extract_json(input).unwrap(),
            json!({"pain_points": [{"id": "pp_1"}]})
        );
    }

    #[test]
    fn test_all_strategies_exhausted() {
        let input = "```json\n{oops}\n```";
        assert!(matches!(extract_json(input), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_no_json_anywhere() {
        let err = extract_json("I could not analyze these issues.").unwrap_err();
        assert!(matches!(err, Error::ParseError(msg) if msg.contains("No JSON object")));
    }

    #[test]
    fn test_parse_llm_response_builds_analysis() {
        let input = "```json\n{\"overview\": [\"Slow CI\"], \"pain_points\": []}\n```";
        let analysis = parse_llm_response(input).unwrap();
        assert_eq!(analysis.overview, vec!["Slow CI".to_string()]);
        assert!(analysis.pain_points.is_empty());
    }
}
