pub mod pipeline;
pub mod extractor;
pub mod flatten;

pub use pipeline::{AnalysisPipeline, DemandReport};
pub use extractor::DemandExtractor;
pub use flatten::{bulk_issues_to_text, join_issue_blocks, IssueText};
