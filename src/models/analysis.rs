use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;
use crate::error::{Error, Result};

/// Structured reply of the demand analysis.
///
/// Cross-references between the lists (`pp_*` ids in feature requests,
/// `fr_*` ids in roadmap steps) are carried as plain strings and never
/// checked against each other.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub overview: Vec<String>,
    #[serde(default, deserialize_with = "lenient::null_as_empty")]
    pub pain_points: Vec<PainPoint>,
    #[serde(default, deserialize_with = "lenient::null_as_empty")]
    pub merged_feature_requests: Vec<FeatureRequest>,
    #[serde(default, deserialize_with = "lenient::null_as_empty")]
    pub roadmap: Vec<RoadmapStep>,
    /// The reply exactly as parsed, kept for the JSON output format.
    #[serde(skip)]
    pub raw: Value,
}

impl AnalysisResult {
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::ParseError(format!(
                "expected a JSON object from the model, got {}",
                json_kind(&value)
            )));
        }

        let mut result = AnalysisResult::deserialize(&value)
            .map_err(|e| Error::ParseError(format!("Unexpected analysis shape: {}", e)))?;
        result.raw = value;
        Ok(result)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PainPoint {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub evidence_issue_numbers: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub why_it_matters: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub related_pain_point_ids: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadmapStep {
    #[serde(default, deserialize_with = "lenient::opt_step")]
    pub step: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub related_feature_request_ids: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub rationale: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null_lists_are_empty() {
        let result = AnalysisResult::from_value(json!({
            "overview": ["Users want faster builds"],
            "pain_points": null
        }))
        .unwrap();

        assert_eq!(result.overview.len(), 1);
        assert!(result.pain_points.is_empty());
        assert!(result.merged_feature_requests.is_empty());
        assert!(result.roadmap.is_empty());
        assert_eq!(result.raw["overview"][0], "Users want faster builds");
    }

    #[test]
    fn test_loose_records() {
        let result = AnalysisResult::from_value(json!({
            "pain_points": [{"id": "pp_1", "evidence_issue_numbers": [3, 9], "extra": true}],
            "roadmap": [{"step": "2", "related_feature_request_ids": "fr_1"}]
        }))
        .unwrap();

        let pp = &result.pain_points[0];
        assert_eq!(pp.id.as_deref(), Some("pp_1"));
        assert_eq!(pp.evidence_issue_numbers, vec!["3", "9"]);
        assert_eq!(pp.summary, None);
        assert_eq!(result.roadmap[0].step, Some(2));
        assert_eq!(result.roadmap[0].related_feature_request_ids, vec!["fr_1"]);
    }

    #[test]
    fn test_falsy_lists_are_empty() {
        let result = AnalysisResult::from_value(json!({
            "overview": [],
            "pain_points": {},
            "merged_feature_requests": false,
            "roadmap": ""
        }))
        .unwrap();

        assert!(result.pain_points.is_empty());
        assert!(result.merged_feature_requests.is_empty());
        assert!(result.roadmap.is_empty());
    }

    #[test]
    fn test_non_empty_non_list_is_rejected() {
        let err = AnalysisResult::from_value(json!({"pain_points": {"id": "pp_1"}})).unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }

    #[test]
    fn test_rejects_non_object() {
        let err = AnalysisResult::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::ParseError(msg) if msg.contains("an array")));
    }
}
