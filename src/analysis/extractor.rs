use std::sync::Arc;

use crate::analysis::flatten::{join_issue_blocks, IssueText};
use crate::error::Result;
use crate::llm::{build_user_prompt, parse_llm_response, ChatProvider, SYSTEM_PROMPT};
use crate::models::AnalysisResult;

/// Turns flattened issues into an [`AnalysisResult`] with one chat call.
pub struct DemandExtractor {
    llm: Arc<dyn ChatProvider>,
}

impl DemandExtractor {
    pub fn new(llm: Arc<dyn ChatProvider>) -> Self {
        Self { llm }
    }

    pub async fn analyze(&self, issues: &[IssueText]) -> Result<AnalysisResult> {
        let issue_blocks = join_issue_blocks(issues);
        let user_prompt = build_user_prompt(&issue_blocks);

        tracing::info!(
            "Asking {} ({}) to analyze {} issues",
            self.llm.name(),
            self.llm.model(),
            issues.len()
        );
        let output = self.llm.chat(SYSTEM_PROMPT, &user_prompt).await?;
        tracing::debug!("Model replied with {} chars", output.len());

        parse_llm_response(&output)
    }
}
