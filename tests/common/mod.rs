#![allow(dead_code)]

use github_repo_stats::actors::{query_cache, QueryCache, QueryCacheConfig, QueryCacheMessage, QueryState};
use github_repo_stats::github::GitHubClient;
use ractor::ActorRef;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Repository payload shaped like the GitHub API, extra fields included
pub fn repos_payload() -> serde_json::Value {
    json!([
        { "name": "a", "full_name": "octocat/a", "language": "Go", "stargazers_count": 3 },
        { "name": "b", "full_name": "octocat/b", "language": "Go", "stargazers_count": 2 },
        { "name": "c", "full_name": "octocat/c", "language": null, "stargazers_count": 1 },
        { "name": "d", "full_name": "octocat/d", "language": "Rust", "stargazers_count": 10 }
    ])
}

pub async fn mount_repos(server: &MockServer, user: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/repos", user)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, user: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/repos", user)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::with_base_url(&server.uri()).expect("Failed to create client")
}

pub async fn spawn_cache(server: &MockServer, config: QueryCacheConfig) -> ActorRef<QueryCacheMessage> {
    QueryCache::spawn(client_for(server), config)
        .await
        .expect("Failed to spawn query cache")
}

/// Poll the cache until the query for `user` settles
pub async fn wait_until_settled(cache: &ActorRef<QueryCacheMessage>, user: &str) -> QueryState {
    for _ in 0..100 {
        let state = query_cache::query_state(cache, user)
            .await
            .expect("Failed to read query state");
        if !state.is_pending() {
            return state;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    panic!("Query for {} never settled", user);
}

/// Poll the cache until no fetch is in flight
pub async fn wait_until_idle(cache: &ActorRef<QueryCacheMessage>) {
    for _ in 0..100 {
        let stats = query_cache::cache_stats(cache)
            .await
            .expect("Failed to read cache stats");
        if stats.in_flight == 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    panic!("Fetches never finished");
}
