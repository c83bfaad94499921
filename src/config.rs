use std::env;
use std::fmt;
use tracing_subscriber::EnvFilter;

use crate::github::client::GITHUB_API_BASE;
use crate::llm::openai::{DEFAULT_MODEL, OPENAI_API_BASE};

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub github_api_url: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub model: String,
}

impl Config {
    /// Reads credentials and endpoints from the process environment.
    ///
    /// Nothing here is required: a missing `OPENAI_API_KEY` only fails once the
    /// chat client is constructed, and GitHub works unauthenticated.
    pub fn from_env() -> Self {
        let github_token = non_empty_var("GITHUB_TOKEN");
        let openai_api_key = non_empty_var("OPENAI_API_KEY");

        let github_api_url =
            non_empty_var("GITHUB_API_URL").unwrap_or_else(|| GITHUB_API_BASE.to_string());

        let openai_base_url =
            non_empty_var("OPENAI_BASE_URL").unwrap_or_else(|| OPENAI_API_BASE.to_string());

        let model = non_empty_var("DEMANDLENS_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            github_token,
            github_api_url,
            openai_api_key,
            openai_base_url,
            model,
        }
    }
}

/// Log filter used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_LOG_FILTER: &str = "demandlens=info,reqwest=warn";

/// Builds the tracing filter; a valid `rust_log` replaces the default entirely.
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Issue state filter accepted by the issues endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum IssueState {
    #[default]
    Open,
    Closed,
    All,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
            IssueState::All => "all",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub state: IssueState,
    pub max_issues: u32,
    pub include_pull_requests: bool,
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            state: IssueState::Open,
            max_issues: 100,
            include_pull_requests: false,
            show_progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_state_query_values() {
        assert_eq!(IssueState::Open.as_str(), "open");
        assert_eq!(IssueState::Closed.to_string(), "closed");
        assert_eq!(IssueState::All.as_str(), "all");
        assert_eq!(IssueState::default(), IssueState::Open);
    }

    #[test]
    fn test_rust_log_overrides_default_filter() {
        let filter = log_filter(Some("demandlens=debug")).to_string();
        assert!(filter.contains("demandlens=debug"));
        assert!(!filter.contains("demandlens=info"));
    }

    #[test]
    fn test_default_log_filter() {
        let filter = log_filter(None).to_string();
        assert!(filter.contains("demandlens=info"));
        assert!(filter.contains("reqwest=warn"));
        assert_eq!(log_filter(Some("  ")).to_string(), filter);
    }

    #[test]
    fn test_pipeline_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_issues, 100);
        assert!(!config.include_pull_requests);
    }
}
