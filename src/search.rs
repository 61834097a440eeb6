//! Multi-criteria country search and the name-ordered country listing.

use crate::models::{CountryListing, CountryPage, CountryRecord, CountryRef, SearchCriteria, SearchResults};
use rustc_hash::FxHashSet;

/// Search criteria with case folding applied once, up front.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    min_population: Option<u64>,
    max_population: Option<u64>,
    region: Option<String>,
    languages: FxHashSet<String>,
}

impl SearchFilter {
    pub fn new(criteria: &SearchCriteria) -> Self {
        Self {
            min_population: criteria.min_population,
            max_population: criteria.max_population,
            region: criteria
                .region
                .as_deref()
                .filter(|r| !r.is_empty())
                .map(str::to_lowercase),
            languages: criteria
                .languages
                .iter()
                .filter(|l| !l.trim().is_empty())
                .map(|l| l.to_lowercase())
                .collect(),
        }
    }

    pub fn matches(&self, record: &CountryRecord) -> bool {
        if let Some(region) = &self.region {
            if record.region.to_lowercase() != *region {
                return false;
            }
        }
        if self.min_population.is_some_and(|min| record.population < min) {
            return false;
        }
        if self.max_population.is_some_and(|max| record.population > max) {
            return false;
        }
        self.speaks_any(record)
    }

    /// Query tokens match either a language code or a display name
    fn speaks_any(&self, record: &CountryRecord) -> bool {
        if self.languages.is_empty() {
            return true;
        }
        record.languages.iter().any(|(code, name)| {
            self.languages.contains(&code.to_lowercase())
                || self.languages.contains(&name.to_lowercase())
        })
    }
}

/// Records passing every predicate, ordered by display name.
pub fn search(records: &[CountryRecord], criteria: &SearchCriteria) -> SearchResults {
    let filter = SearchFilter::new(criteria);

    let mut matched: Vec<&CountryRecord> = records.iter().filter(|r| filter.matches(r)).collect();
    matched.sort_by(|a, b| a.name.cmp(&b.name));

    let results: Vec<CountryRef> = matched
        .into_iter()
        .map(|r| CountryRef {
            code: r.code.clone(),
            name: r.name.clone(),
        })
        .collect();

    SearchResults {
        total: results.len(),
        results,
    }
}

/// One page of all countries ordered by display name.
pub fn list_countries(
    records: &[CountryRecord],
    limit: usize,
    offset: usize,
    include_borders: bool,
) -> CountryPage {
    let mut sorted: Vec<&CountryRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let results = sorted
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(|r| CountryListing {
            code: r.code.clone(),
            name: r.name.clone(),
            region: r.region.clone(),
            population: r.population,
            capital: r.capital.clone(),
            borders: include_borders.then(|| r.borders.clone()),
        })
        .collect();

    CountryPage {
        total: records.len(),
        limit,
        offset,
        results,
    }
}
