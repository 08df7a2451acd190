use crate::actors::QueryState;
use crate::components::html::escape;
use crate::stats::extract_stats;
use crate::types::Repository;
use url::Url;

pub const LOADING_MESSAGE: &str = "Loading";
pub const ERROR_MESSAGE: &str = "An error has occurred";
pub const DEFAULT_PROFILE_BASE_URL: &str = "https://github.com";

/// Renders the stats block for one user from whatever the query cache holds
#[derive(Debug, Clone)]
pub struct StatsView {
    profile_base_url: String,
}

impl Default for StatsView {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE_BASE_URL)
    }
}

impl StatsView {
    pub fn new(profile_base_url: impl Into<String>) -> Self {
        Self {
            profile_base_url: profile_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn profile_url(&self, user: &str) -> String {
        match Url::parse(&self.profile_base_url) {
            Ok(mut url) if !url.cannot_be_a_base() => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(user);
                }
                url.to_string()
            }
            _ => format!("{}/{}", self.profile_base_url, user),
        }
    }

    pub fn render(&self, user: &str, state: &QueryState) -> String {
        match state {
            QueryState::Idle | QueryState::Loading => {
                format!(r#"<p class="loading">{}</p>"#, LOADING_MESSAGE)
            }
            QueryState::Error(_) => format!(r#"<p class="error">{}</p>"#, ERROR_MESSAGE),
            QueryState::Success { repositories, .. } => self.render_success(user, repositories),
        }
    }

    fn render_success(&self, user: &str, repositories: &[Repository]) -> String {
        let stats = extract_stats(repositories);
        let profile_url = escape(&self.profile_url(user));

        let languages: String = stats
            .languages
            .iter()
            .map(|language| format!("<li>{}</li>", escape(language)))
            .collect();

        format!(
            concat!(
                r#"<div class="stats">"#,
                r#"<p>Profile: <a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a></p>"#,
                "<p>Number of public repos: {repos}</p>",
                "<p>Total number of stars: {stars}</p>",
                "<p>Languages:</p>",
                "<ul>{languages}</ul>",
                "</div>"
            ),
            url = profile_url,
            repos = repositories.len(),
            stars = stats.total_stars,
            languages = languages,
        )
    }
}
