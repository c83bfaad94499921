pub mod client;
pub mod paginator;
pub mod repo_url;

pub use client::GitHubClient;
pub use paginator::Paginator;
pub use repo_url::{parse_repo_url, RepoRef};
