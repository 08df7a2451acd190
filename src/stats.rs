use crate::types::Repository;
use std::collections::BTreeSet;

/// Aggregates derived from a user's repository list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_stars: u64,
    pub languages: BTreeSet<String>,
}

/// Fold repository records into total stars and the distinct languages used.
///
/// Records without a language (null, missing or empty) still count toward
/// the star total.
pub fn extract_stats(repositories: &[Repository]) -> Stats {
    repositories.iter().fold(Stats::default(), |mut stats, repo| {
        stats.total_stars = stats.total_stars.saturating_add(repo.stargazers_count);

        if let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) {
            stats.languages.insert(language.to_string());
        }

        stats
    })
}
