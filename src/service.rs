use crate::error::{AtlasError, CodeRole, Result};
use crate::graph::AdjacencyGraph;
use crate::models::{CountryPage, NeighborAnalysis, RegionStats, RouteOutcome, SearchCriteria, SearchResults};
use crate::neighbors::analyze_neighbors;
use crate::normalize::{normalize, normalize_all};
use crate::provider::CountryProvider;
use crate::region::aggregate_region;
use crate::search;
use tracing::{debug, info};

/// Request-level operations: fetch from the provider, normalize, analyze.
///
/// Holds no derived state between calls; every request rebuilds what it needs
/// from freshly fetched records.
pub struct CountryService<P> {
    provider: P,
}

impl<P: CountryProvider> CountryService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn list_countries(&self, limit: usize, offset: usize, include_borders: bool) -> Result<CountryPage> {
        let records = normalize_all(&self.provider.all_countries()?);
        Ok(search::list_countries(&records, limit, offset, include_borders))
    }

    pub fn neighbors(&self, code: &str) -> Result<NeighborAnalysis> {
        let code = code.to_uppercase();
        let base = self
            .provider
            .country_by_code(&code)?
            .map(|raw| normalize(&raw))
            .ok_or_else(|| AtlasError::unknown(&code, CodeRole::Country))?;

        if base.borders.is_empty() {
            debug!(code = %code, "Country has no land borders");
            return Ok(analyze_neighbors(&base, &[]));
        }

        let neighbors = normalize_all(&self.provider.countries_by_codes(&base.borders)?);
        let analysis = analyze_neighbors(&base, &neighbors);
        info!(
            code = %code,
            neighbors = analysis.neighbors.len(),
            shared = analysis.shared_languages.len(),
            "Neighbor analysis complete"
        );
        Ok(analysis)
    }

    pub fn route(&self, from: &str, to: &str) -> Result<RouteOutcome> {
        let (src, dst) = (from.to_uppercase(), to.to_uppercase());
        let records = normalize_all(&self.provider.all_countries()?);
        let graph = AdjacencyGraph::build(&records);
        debug!(nodes = graph.len(), "Border graph built");

        let outcome = graph.find_route(&src, &dst)?;
        match &outcome {
            RouteOutcome::Connected(route) => {
                info!(from = %src, to = %dst, hops = route.hops(), "Route found");
            }
            RouteOutcome::NotConnected => {
                info!(from = %src, to = %dst, "No land route");
            }
        }
        Ok(outcome)
    }

    pub fn region_stats(&self, region: &str) -> Result<RegionStats> {
        let records = normalize_all(&self.provider.countries_in_region(region)?);
        let stats = aggregate_region(region, &records)?;
        info!(
            region,
            countries = stats.countries_count,
            "Region aggregated"
        );
        Ok(stats)
    }

    pub fn search(&self, criteria: &SearchCriteria) -> Result<SearchResults> {
        let records = normalize_all(&self.provider.all_countries()?);
        let results = search::search(&records, criteria);
        debug!(matched = results.total, scanned = records.len(), "Search complete");
        Ok(results)
    }
}
