use serde::Deserialize;

// GitHub API response structures

/// A single entry of `GET /users/{user}/repos`. Only the fields the widget
/// aggregates over are kept; everything else in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub language: Option<String>,
    pub stargazers_count: u64,
}

impl Repository {
    pub fn new(language: Option<&str>, stargazers_count: u64) -> Self {
        Self {
            language: language.map(str::to_string),
            stargazers_count,
        }
    }
}
