use chrono::Utc;
use github_repo_stats::actors::QueryState;
use github_repo_stats::components::stats_view::{ERROR_MESSAGE, LOADING_MESSAGE};
use github_repo_stats::components::{Page, StatsView};
use github_repo_stats::types::Repository;
use std::time::Duration;

fn success(repositories: Vec<Repository>) -> QueryState {
    QueryState::Success {
        repositories,
        fetched_at: Utc::now(),
    }
}

#[test]
fn test_loading_indicator() {
    let view = StatsView::default();

    for state in [QueryState::Idle, QueryState::Loading] {
        let html = view.render("octocat", &state);
        assert!(html.contains(LOADING_MESSAGE));
        assert!(!html.contains(ERROR_MESSAGE));
        assert!(!html.contains("Total number of stars"));
    }
}

#[test]
fn test_error_indicator_hides_details() {
    let view = StatsView::default();
    let state = QueryState::Error("Resource not found: secret detail".to_string());

    let html = view.render("octocat", &state);

    assert!(html.contains(ERROR_MESSAGE));
    assert!(!html.contains("secret detail"));
    assert!(!html.contains(LOADING_MESSAGE));
}

#[test]
fn test_success_summary() {
    let view = StatsView::default();
    let state = success(vec![
        Repository::new(Some("Go"), 3),
        Repository::new(Some("Go"), 2),
        Repository::new(None, 1),
        Repository::new(Some("Rust"), 4),
    ]);

    let html = view.render("octocat", &state);

    assert!(html.contains(r#"href="https://github.com/octocat""#));
    assert!(html.contains("Number of public repos: 4"));
    assert!(html.contains("Total number of stars: 10"));
    assert!(html.contains("<ul><li>Go</li><li>Rust</li></ul>"));
    assert!(!html.contains(LOADING_MESSAGE));
    assert!(!html.contains(ERROR_MESSAGE));
}

#[test]
fn test_success_with_no_repositories() {
    let html = StatsView::default().render("octocat", &success(vec![]));

    assert!(html.contains("Number of public repos: 0"));
    assert!(html.contains("Total number of stars: 0"));
    assert!(html.contains("<ul></ul>"));
}

#[test]
fn test_custom_profile_base_url() {
    let view = StatsView::new("https://github.example.com/");

    assert_eq!(view.profile_url("octocat"), "https://github.example.com/octocat");
}

#[test]
fn test_profile_url_encodes_username() {
    let view = StatsView::default();

    let url = view.profile_url("a b/c");

    assert!(url.starts_with("https://github.com/"));
    assert!(!url.contains(' '));
    assert!(!url.ends_with("/c"));
}

#[test]
fn test_language_names_are_escaped() {
    let html = StatsView::default().render("octocat", &success(vec![Repository::new(Some("<b>"), 1)]));

    assert!(html.contains("<li>&lt;b&gt;</li>"));
}

#[test]
fn test_page_refreshes_only_while_pending() {
    let view = StatsView::default();
    let loading = QueryState::Loading;
    let settled = success(vec![]);

    let pending_page = Page {
        user: "octocat",
        state: &loading,
        stats_view: &view,
        refresh: Duration::from_secs(2),
    }
    .render();

    let settled_page = Page {
        user: "octocat",
        state: &settled,
        stats_view: &view,
        refresh: Duration::from_secs(2),
    }
    .render();

    assert!(pending_page.contains(r#"<meta http-equiv="refresh" content="2">"#));
    assert!(!settled_page.contains("http-equiv=\"refresh\""));
    assert!(settled_page.contains(r#"value="octocat""#));
}
