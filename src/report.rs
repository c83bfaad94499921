use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{AnalysisResult, FeatureRequest, PainPoint, RoadmapStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

pub struct ReportContext<'a> {
    pub repo_url: &'a str,
    pub issue_count: usize,
    pub generated_at: DateTime<Utc>,
}

pub fn render(format: OutputFormat, ctx: &ReportContext<'_>, analysis: &AnalysisResult) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(render_markdown_report(ctx, analysis)),
        OutputFormat::Json => render_json(analysis),
    }
}

/// Pretty-prints the model's reply as it was parsed. An analysis that never
/// saw a reply is written from its typed fields instead.
pub fn render_json(analysis: &AnalysisResult) -> Result<String> {
    let mut output = if analysis.raw.is_null() {
        serde_json::to_string_pretty(analysis)?
    } else {
        serde_json::to_string_pretty(&analysis.raw)?
    };
    output.push('\n');
    Ok(output)
}

pub fn render_markdown_report(ctx: &ReportContext<'_>, analysis: &AnalysisResult) -> String {
    let mut output = String::new();

    output.push_str("## Overview\n\n");
    output.push_str(&format!("- **Repository**: {}\n", ctx.repo_url));
    output.push_str(&format!("- **Analyzed Issues**: {}\n\n", ctx.issue_count));
    output.push_str(&format_overview(&analysis.overview));

    output.push_str("\n\n## Top User Pain Points\n\n");
    output.push_str(&format_pain_points(&analysis.pain_points));

    output.push_str("\n\n## Feature Requests (Merged)\n\n");
    output.push_str(&format_feature_requests(&analysis.merged_feature_requests));

    output.push_str("\n\n## Suggested Roadmap\n\n");
    output.push_str(&format_roadmap(&analysis.roadmap));

    output.push_str(&format!(
        "\n\n---\n*Generated on {}*\n",
        ctx.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn text_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => fallback,
    }
}

fn list_or_na(items: &[String]) -> String {
    if items.is_empty() {
        "N/A".to_string()
    } else {
        items.join(", ")
    }
}

fn format_overview(overview: &[String]) -> String {
    if overview.is_empty() {
        return "No overview generated.".to_string();
    }
    overview
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_pain_points(pain_points: &[PainPoint]) -> String {
    if pain_points.is_empty() {
        return "_No major pain points identified._".to_string();
    }

    pain_points
        .iter()
        .map(|pp| {
            format!(
                "### {} - {}\n- **Priority**: {}\n- **Evidence Issues**: {}\n\n{}",
                text_or(&pp.id, "(no id)"),
                text_or(&pp.summary, "(no summary)"),
                text_or(&pp.priority, "Unspecified"),
                list_or_na(&pp.evidence_issue_numbers),
                text_or(&pp.why_it_matters, "_No rationale provided._"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_feature_requests(features: &[FeatureRequest]) -> String {
    if features.is_empty() {
        return "_No merged feature requests generated._".to_string();
    }

    features
        .iter()
        .map(|fr| {
            format!(
                "### {} - {}\n- **Priority**: {}\n- **Related Pain Points**: {}\n\n{}",
                text_or(&fr.id, "(no id)"),
                text_or(&fr.summary, "(no summary)"),
                text_or(&fr.priority, "Unspecified"),
                list_or_na(&fr.related_pain_point_ids),
                text_or(&fr.notes, "_No additional notes._"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_roadmap(roadmap: &[RoadmapStep]) -> String {
    if roadmap.is_empty() {
        return "_No roadmap suggested._".to_string();
    }

    let mut steps: Vec<&RoadmapStep> = roadmap.iter().collect();
    steps.sort_by_key(|s| s.step.unwrap_or(0));

    steps
        .iter()
        .map(|step| {
            let number = step
                .step
                .map(|n| n.to_string())
                .unwrap_or_else(|| "?".to_string());
            format!(
                "### Step {}: {}\n- **Feature Requests**: {}\n\n{}",
                number,
                text_or(&step.title, "(untitled)"),
                list_or_na(&step.related_feature_request_ids),
                text_or(&step.rationale, "_No rationale provided._"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
