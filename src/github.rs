use crate::error::{RepoStatsError, Result};
use crate::types::Repository;
use reqwest::{Client, Response};
use tracing::{debug, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";

/// Thin client for the one GitHub endpoint the widget reads
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            RepoStatsError::ConfigError(format!("Invalid API base URL {}: {}", base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(RepoStatsError::ConfigError(format!(
                "API base URL cannot be used as a base: {}",
                base_url
            )));
        }

        let client = Client::builder()
            .user_agent(concat!("github-repo-stats/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GitHubClient { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/users/{user}/repos`, with the username encoded as one path segment
    pub fn repos_url(&self, user: &str) -> Result<Url> {
        if user.is_empty() {
            return Err(RepoStatsError::InvalidUsername(
                "username must not be empty".to_string(),
            ));
        }

        // Dot segments would be resolved away and hit a different endpoint
        if user == "." || user == ".." {
            return Err(RepoStatsError::InvalidUsername(format!(
                "{:?} is not a username",
                user
            )));
        }

        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                RepoStatsError::ConfigError(format!(
                    "API base URL cannot be used as a base: {}",
                    self.base_url
                ))
            })?;
            segments.pop_if_empty().extend(["users", user, "repos"]);
        }

        Ok(url)
    }

    async fn make_request(&self, url: &Url) -> Result<Response> {
        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response),
            reqwest::StatusCode::NOT_FOUND => {
                Err(RepoStatsError::NotFound(format!("Resource not found: {}", url)))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                warn!(%url, %status, "GitHub API request failed");
                Err(RepoStatsError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }

    /// Fetch the public repositories of `user`. Only the first page the API
    /// returns is read.
    pub async fn list_user_repos(&self, user: &str) -> Result<Vec<Repository>> {
        let url = self.repos_url(user)?;
        debug!(%url, "Fetching repositories");

        let response = self.make_request(&url).await?;
        let body = response.text().await?;
        let repositories: Vec<Repository> = serde_json::from_str(&body)?;

        debug!(user, count = repositories.len(), "Fetched repositories");
        Ok(repositories)
    }
}
