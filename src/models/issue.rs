use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Item returned by `GET /repos/{owner}/{repo}/issues`.
///
/// The endpoint mixes pull requests in with issues; those carry a
/// `pull_request` object, which is the only reliable marker.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueItem {
    pub id: u64,
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub user: Option<ApiUser>,
    #[serde(default)]
    pub labels: Vec<ApiLabel>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl IssueItem {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Item returned by `GET /repos/{owner}/{repo}/issues/{number}/comments`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentItem {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub user: Option<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiLabel {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: String,
    pub state: String,
    pub html_url: String,
    pub user: Option<String>,
    pub labels: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: u64,
    pub body: String,
    pub user: Option<String>,
}

impl From<IssueItem> for Issue {
    fn from(item: IssueItem) -> Self {
        Self {
            id: item.id,
            number: item.number,
            title: item.title.unwrap_or_default(),
            body: item.body.unwrap_or_default(),
            state: item.state.unwrap_or_default(),
            html_url: item.html_url.unwrap_or_default(),
            user: item.user.map(|u| u.login),
            labels: item.labels.into_iter().filter_map(|l| l.name).collect(),
            created_at: item.created_at,
            comments: Vec::new(),
        }
    }
}

impl From<CommentItem> for Comment {
    fn from(item: CommentItem) -> Self {
        Self {
            id: item.id,
            body: item.body.unwrap_or_default(),
            user: item.user.map(|u| u.login),
        }
    }
}
