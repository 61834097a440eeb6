//! Neighborhood analysis: combined population and shared languages between a
//! country and the countries it borders.

use crate::models::{CountryRecord, NeighborAnalysis, NeighborSummary, SharedLanguageEntry};
use std::collections::BTreeSet;

/// Analyzes `base` against the records of its bordering countries.
///
/// A base without borders ignores `neighbors` entirely, so callers can skip
/// fetching them. Language overlap compares display names; neighbors sharing
/// none are left out of `shared_languages`.
pub fn analyze_neighbors(base: &CountryRecord, neighbors: &[CountryRecord]) -> NeighborAnalysis {
    let country = NeighborSummary::from(base);

    if base.borders.is_empty() {
        return NeighborAnalysis {
            country,
            neighbors: Vec::new(),
            total_population: base.population,
            shared_languages: Vec::new(),
        };
    }

    let total_population = neighbors
        .iter()
        .fold(base.population, |acc, n| acc.saturating_add(n.population));

    NeighborAnalysis {
        country,
        neighbors: neighbors.iter().map(NeighborSummary::from).collect(),
        total_population,
        shared_languages: shared_languages(base, neighbors),
    }
}

fn shared_languages(base: &CountryRecord, neighbors: &[CountryRecord]) -> Vec<SharedLanguageEntry> {
    if base.languages.is_empty() {
        return Vec::new();
    }

    neighbors
        .iter()
        .filter_map(|n| {
            // BTreeSet iteration is already sorted
            let shared: Vec<String> = language_overlap(base, n).into_iter().collect();
            if shared.is_empty() {
                return None;
            }
            Some(SharedLanguageEntry {
                code: n.code.clone(),
                name: n.name.clone(),
                languages: shared,
            })
        })
        .collect()
}

/// Language display names two countries have in common
pub fn language_overlap(a: &CountryRecord, b: &CountryRecord) -> BTreeSet<String> {
    a.language_names()
        .intersection(&b.language_names())
        .map(|s| s.to_string())
        .collect()
}
