use clap::Parser;
use colored::*;
use github_repo_stats::actors::{QueryCache, QueryCacheConfig};
use github_repo_stats::cli::Cli;
use github_repo_stats::components::StatsView;
use github_repo_stats::error::{RepoStatsError, Result};
use github_repo_stats::github::GitHubClient;
use github_repo_stats::server::{self, AppState};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("{}", "GitHub Repo Stats".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let client = GitHubClient::with_base_url(&cli.api_base_url)?;

    let cache_time = Duration::from_secs(cli.cache_time_secs);
    let cache_config = QueryCacheConfig {
        stale_time: Duration::from_secs(cli.stale_time_secs),
        cache_time,
        gc_interval: cache_time.clamp(Duration::from_secs(1), Duration::from_secs(60)),
    };

    let cache = QueryCache::spawn(client, cache_config)
        .await
        .map_err(|e| RepoStatsError::CacheError(format!("Failed to start query cache: {}", e)))?;

    let state = AppState::new(
        cli.default_user.clone(),
        cache.clone(),
        StatsView::new(cli.profile_base_url.clone()),
        Duration::from_secs(cli.refresh_secs),
    );

    println!("✅ Showing stats for {}", cli.default_user.bold());
    println!("🌐 Open http://{} in your browser", cli.bind);
    println!("\nPress Ctrl+C to stop the server\n");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
        }
        println!("\n🛑 Shutting down server...");
    };

    server::serve(state, &cli.bind, shutdown).await?;

    cache.stop(None);
    println!("✅ Server stopped");

    Ok(())
}
