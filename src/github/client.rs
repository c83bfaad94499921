use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::IssueState;
use crate::error::{Error, Result};
use crate::github::paginator::{Paginator, MAX_PER_PAGE};
use crate::github::repo_url::RepoRef;
use crate::models::{Comment, CommentItem, Issue, IssueItem};

pub const GITHUB_API_BASE: &str = "https://api.github.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ERROR_BODY_LIMIT: usize = 500;

pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Builds a client for `api.github.com`. Without a token requests go out
    /// unauthenticated, which GitHub allows at a lower rate limit.
    pub fn new(token: Option<&str>) -> Result<Self> {
        Self::with_base_url(token, GITHUB_API_BASE)
    }

    pub fn with_base_url(token: Option<&str>, base_url: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("demandlens/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` relative to the API root. Any status >= 400 fails the call.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        tracing::debug!("Fetching: {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(Error::GitHubApi(format!("{} for {}: {}", status, url, snippet)));
        }

        Ok(response.json().await?)
    }

    /// Lists the most recently created issues of `repo`, newest first.
    ///
    /// The issues endpoint also returns pull requests; they are dropped unless
    /// `include_pull_requests` is set.
    pub async fn list_issues(
        &self,
        repo: &RepoRef,
        state: IssueState,
        max_issues: u32,
        include_pull_requests: bool,
    ) -> Result<Vec<Issue>> {
        if max_issues == 0 {
            return Ok(Vec::new());
        }

        let path = format!("repos/{}/{}/issues", repo.owner, repo.name);
        let query = [
            ("state", state.to_string()),
            ("sort", "created".to_string()),
            ("direction", "desc".to_string()),
        ];

        tracing::info!("Listing {} issues for {} (max {})", state, repo, max_issues);
        let paginator = Paginator::for_limit(self, max_issues);
        let items: Vec<IssueItem> = paginator
            .fetch_limited(&path, &query, max_issues as usize, |item: &IssueItem| {
                include_pull_requests || !item.is_pull_request()
            })
            .await?;

        Ok(items.into_iter().map(Issue::from).collect())
    }

    /// Fetches the first page of comments on one issue.
    ///
    /// Only a single page of up to 100 comments is requested; longer threads
    /// are cut off there.
    pub async fn list_comments(&self, repo: &RepoRef, issue_number: u64) -> Result<Vec<Comment>> {
        let path = format!("repos/{}/{}/issues/{}/comments", repo.owner, repo.name, issue_number);
        let items: Vec<CommentItem> = self
            .get_json(&path, &[("per_page", MAX_PER_PAGE.to_string())])
            .await?;

        Ok(items.into_iter().map(Comment::from).collect())
    }

    /// Attaches comments to every issue in place, one request per issue.
    pub async fn fetch_comments_for_issues(
        &self,
        repo: &RepoRef,
        issues: &mut [Issue],
        show_progress: bool,
    ) -> Result<()> {
        let pb = if show_progress {
            ProgressBar::new(issues.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(progress_style());

        for issue in issues.iter_mut() {
            issue.comments = self.list_comments(repo, issue.number).await?;
            pb.inc(1);
        }

        pb.finish_with_message("Fetched comments");
        Ok(())
    }
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} issues")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
