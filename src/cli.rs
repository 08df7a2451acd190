use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "github-repo-stats")]
#[command(about = "GitHub Repo Stats - Shows a user's total stars and languages in the browser")]
#[command(version)]
pub struct Cli {
    /// Address the widget is served on
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind: String,

    /// Username shown before the first search
    #[arg(long, env = "DEFAULT_USER", default_value = "danielkvist")]
    pub default_user: String,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_base_url: String,

    /// Base URL profile links point at
    #[arg(long, env = "GITHUB_PROFILE_URL", default_value = "https://github.com")]
    pub profile_base_url: String,

    /// Seconds a fetched result is reused before it is refreshed
    #[arg(long, env = "STALE_TIME_SECS", default_value_t = 0)]
    pub stale_time_secs: u64,

    /// Seconds an unused result is kept in memory
    #[arg(long, env = "CACHE_TIME_SECS", default_value_t = 300)]
    pub cache_time_secs: u64,

    /// Seconds between reloads of a page that is still loading
    #[arg(long, env = "REFRESH_SECS", default_value_t = 1)]
    pub refresh_secs: u64,
}
