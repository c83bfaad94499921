use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::{Error, Result};

static SSH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^git@github\.com:(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?$")
        .expect("valid ssh repo regex")
});

static HTTPS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://github\.com/(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$")
        .expect("valid https repo regex")
});

/// Owner and name of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parses `https://github.com/owner/repo` or `git@github.com:owner/repo.git`.
pub fn parse_repo_url(repo_url: &str) -> Result<RepoRef> {
    let url = repo_url.trim();

    let captures = SSH_RE
        .captures(url)
        .or_else(|| HTTPS_RE.captures(url))
        .ok_or_else(|| Error::InvalidRepoUrl(format!("unsupported GitHub repo URL: {:?}", repo_url)))?;

    Ok(RepoRef {
        owner: captures["owner"].to_string(),
        name: captures["repo"].to_string(),
    })
}
