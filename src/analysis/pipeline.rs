use std::sync::Arc;

use crate::analysis::extractor::DemandExtractor;
use crate::analysis::flatten::bulk_issues_to_text;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::github::{GitHubClient, RepoRef};
use crate::llm::ChatProvider;
use crate::models::AnalysisResult;

/// Outcome of one run, ready for rendering.
#[derive(Debug, Clone)]
pub struct DemandReport {
    pub repo: RepoRef,
    pub issues_analyzed: usize,
    pub analysis: AnalysisResult,
}

pub struct AnalysisPipeline {
    github: GitHubClient,
    extractor: DemandExtractor,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(
        github: GitHubClient,
        llm: impl ChatProvider + 'static,
        config: PipelineConfig,
    ) -> Self {
        Self {
            github,
            extractor: DemandExtractor::new(Arc::new(llm)),
            config,
        }
    }

    /// Fetches issues and comments, flattens them and asks the model for
    /// pain points. Every request runs to completion before the next one.
    pub async fn analyze_repo(&self, repo: &RepoRef) -> Result<DemandReport> {
        // Step 1: List issues
        tracing::info!("Fetching issues from {} ...", repo);
        let mut issues = self
            .github
            .list_issues(
                repo,
                self.config.state,
                self.config.max_issues,
                self.config.include_pull_requests,
            )
            .await?;

        // Step 2: Attach comments
        self.github
            .fetch_comments_for_issues(repo, &mut issues, self.config.show_progress)
            .await?;
        tracing::info!("Retrieved {} issues (after PR filtering)", issues.len());

        if issues.is_empty() {
            tracing::warn!("No issues found for {}, skipping LLM analysis", repo);
            return Ok(DemandReport {
                repo: repo.clone(),
                issues_analyzed: 0,
                analysis: AnalysisResult::default(),
            });
        }

        // Step 3: Flatten and analyze
        let issue_texts = bulk_issues_to_text(&issues);
        tracing::info!("Calling LLM to analyze user demands (this may take a while)...");
        let analysis = self.extractor.analyze(&issue_texts).await?;

        Ok(DemandReport {
            repo: repo.clone(),
            issues_analyzed: issue_texts.len(),
            analysis,
        })
    }
}
