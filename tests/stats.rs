use github_repo_stats::stats::{extract_stats, Stats};
use github_repo_stats::types::Repository;
use std::collections::BTreeSet;

fn languages(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_duplicate_and_null_languages() {
    let repos = vec![
        Repository::new(Some("Go"), 3),
        Repository::new(Some("Go"), 2),
        Repository::new(None, 1),
    ];

    let stats = extract_stats(&repos);

    assert_eq!(stats.total_stars, 6);
    assert_eq!(stats.languages, languages(&["Go"]));
}

#[test]
fn test_empty_input() {
    let stats = extract_stats(&[]);

    assert_eq!(stats, Stats::default());
    assert_eq!(stats.total_stars, 0);
    assert!(stats.languages.is_empty());
}

#[test]
fn test_empty_language_is_skipped_but_stars_count() {
    let repos = vec![Repository::new(Some(""), 4), Repository::new(Some("Rust"), 1)];

    let stats = extract_stats(&repos);

    assert_eq!(stats.total_stars, 5);
    assert_eq!(stats.languages, languages(&["Rust"]));
}

#[test]
fn test_total_is_sum_of_star_counts() {
    let counts = [0u64, 1, 7, 42, 1000, 3];
    let repos: Vec<Repository> = counts
        .iter()
        .enumerate()
        .map(|(i, &stars)| Repository::new(if i % 2 == 0 { Some("C") } else { None }, stars))
        .collect();

    let stats = extract_stats(&repos);

    assert_eq!(stats.total_stars, counts.iter().sum::<u64>());
    assert_eq!(stats.languages, languages(&["C"]));
}

#[test]
fn test_each_language_listed_once() {
    let names = ["Rust", "Go", "Rust", "TypeScript", "Go", "Rust"];
    let repos: Vec<Repository> = names.iter().map(|n| Repository::new(Some(n), 1)).collect();

    let stats = extract_stats(&repos);

    assert_eq!(stats.languages.len(), 3);
    assert_eq!(stats.languages, languages(&["Go", "Rust", "TypeScript"]));
}

#[test]
fn test_star_total_saturates() {
    let repos = vec![Repository::new(None, u64::MAX), Repository::new(None, 1)];

    assert_eq!(extract_stats(&repos).total_stars, u64::MAX);
}

#[test]
fn test_repository_deserialization() {
    let json = r#"[
        {"language": "Go", "stargazers_count": 3, "name": "ignored"},
        {"language": null, "stargazers_count": 1},
        {"stargazers_count": 2}
    ]"#;

    let repos: Vec<Repository> = serde_json::from_str(json).expect("Failed to parse repositories");

    assert_eq!(repos.len(), 3);
    assert_eq!(repos[0].language.as_deref(), Some("Go"));
    assert_eq!(repos[1].language, None);
    assert_eq!(repos[2].language, None);
    assert_eq!(extract_stats(&repos).total_stars, 6);
}

#[test]
fn test_negative_star_count_is_rejected() {
    let json = r#"[{"language": "Go", "stargazers_count": -1}]"#;

    assert!(serde_json::from_str::<Vec<Repository>>(json).is_err());
}
