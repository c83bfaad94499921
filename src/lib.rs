pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod llm;
pub mod analysis;
pub mod report;

pub use config::{Config, IssueState, PipelineConfig};
pub use error::{Error, Result};
pub use github::{parse_repo_url, GitHubClient, RepoRef};
pub use llm::{ChatProvider, OpenAIProvider};
pub use analysis::{AnalysisPipeline, DemandReport};
pub use report::{OutputFormat, ReportContext};
