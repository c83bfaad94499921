use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::client::GitHubClient;

/// Largest page size the REST API honours.
pub const MAX_PER_PAGE: u32 = 100;

/// Walks `?page=N` listings until enough items are collected or the API runs dry.
pub struct Paginator<'a> {
    github: &'a GitHubClient,
    per_page: u32,
}

impl<'a> Paginator<'a> {
    pub fn new(github: &'a GitHubClient, per_page: u32) -> Self {
        Self {
            github,
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Sized for a listing capped at `max_items`: small caps get a single small page.
    pub fn for_limit(github: &'a GitHubClient, max_items: u32) -> Self {
        Self::new(github, max_items.min(MAX_PER_PAGE))
    }

    /// Collects up to `max_items` items that pass `keep`.
    ///
    /// `per_page` stays fixed for the whole walk so page offsets line up. An
    /// empty page or one shorter than `per_page` is the end of the listing.
    /// Items rejected by `keep` still count towards the page length.
    pub async fn fetch_limited<T, F>(
        &self,
        path: &str,
        query: &[(&str, String)],
        max_items: usize,
        mut keep: F,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        F: FnMut(&T) -> bool,
    {
        let mut all_items = Vec::new();
        let mut page: u32 = 1;

        while all_items.len() < max_items {
            let mut params: Vec<(&str, String)> = query.to_vec();
            params.push(("per_page", self.per_page.to_string()));
            params.push(("page", page.to_string()));

            let items: Vec<T> = self.github.get_json(path, &params).await?;
            let items_count = items.len();
            if items_count == 0 {
                break;
            }

            for item in items {
                if !keep(&item) {
                    continue;
                }
                all_items.push(item);
                if all_items.len() >= max_items {
                    break;
                }
            }

            if items_count < self.per_page as usize {
                break;
            }

            page += 1;
        }

        all_items.truncate(max_items);
        Ok(all_items)
    }
}
