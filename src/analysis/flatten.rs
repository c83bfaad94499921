use crate::models::Issue;

/// Separator placed between issue blocks in the prompt.
pub const ISSUE_SEPARATOR: &str = "\n\n====================\n\n";

/// Read-only text projection of one issue, built once for prompting.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueText {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub state: String,
    pub url: String,
    pub labels: Vec<String>,
    pub comments: Vec<String>,
}

impl IssueText {
    pub fn to_prompt_block(&self) -> String {
        let mut block = format!("Issue #{}: {}\n", self.number, self.title);
        block.push_str(&format!("State: {}\n", self.state));
        if !self.labels.is_empty() {
            block.push_str(&format!("Labels: {}\n", self.labels.join(", ")));
        }
        block.push_str(&format!("URL: {}\n", self.url));

        let body = if self.body.is_empty() { "(no body)" } else { &self.body };
        block.push_str(&format!("Body:\n{}", body));

        if !self.comments.is_empty() {
            block.push_str("\nComments:\n");
            block.push_str(&self.comments.join("\n---\n"));
        }

        block
    }
}

impl From<&Issue> for IssueText {
    fn from(issue: &Issue) -> Self {
        let comments = issue
            .comments
            .iter()
            .map(|c| match &c.user {
                Some(user) => format!("@{}: {}", user, c.body),
                None => c.body.clone(),
            })
            .collect();

        Self {
            number: issue.number,
            title: issue.title.clone(),
            body: issue.body.clone(),
            state: issue.state.clone(),
            url: issue.html_url.clone(),
            labels: issue.labels.clone(),
            comments,
        }
    }
}

pub fn bulk_issues_to_text(issues: &[Issue]) -> Vec<IssueText> {
    issues.iter().map(IssueText::from).collect()
}

/// Joins issue blocks into the single text embedded in the prompt.
pub fn join_issue_blocks(texts: &[IssueText]) -> String {
    texts
        .iter()
        .map(IssueText::to_prompt_block)
        .collect::<Vec<_>>()
        .join(ISSUE_SEPARATOR)
}
