use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Accepts any JSON value and keeps it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], but a missing, null, or malformed list is empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Non-negative integer, or a non-negative float with no fractional part.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    }))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawName {
    #[serde(default, deserialize_with = "lenient")]
    pub common: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub official: Option<String>,
}

/// A country record as delivered by the data provider. Any field may be
/// missing, null, or malformed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCountry {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<RawName>,
    #[serde(default, deserialize_with = "lenient")]
    pub cca2: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub cca3: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub population: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub capital: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub borders: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub languages: Option<BTreeMap<String, String>>,
}

/// Canonical country record. Borders are codes, never resolved records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountryRecord {
    pub code: String,
    pub name: String,
    pub region: String,
    pub population: u64,
    pub capital: Vec<String>,
    pub borders: Vec<String>,
    /// language code -> display name
    pub languages: BTreeMap<String, String>,
}

/// Projection of a country used in neighbor listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborSummary {
    pub code: String,
    pub name: String,
    pub capital: Vec<String>,
    pub population: u64,
}

impl From<&CountryRecord> for NeighborSummary {
    fn from(record: &CountryRecord) -> Self {
        Self {
            code: record.code.clone(),
            name: record.name.clone(),
            capital: record.capital.clone(),
            population: record.population,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedLanguageEntry {
    pub code: String,
    pub name: String,
    /// Sorted display names shared with the base country
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborAnalysis {
    pub country: NeighborSummary,
    pub neighbors: Vec<NeighborSummary>,
    pub total_population: u64,
    pub shared_languages: Vec<SharedLanguageEntry>,
}

/// Codes from source to destination inclusive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: Vec<String>,
}

impl Route {
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Connected(Route),
    NotConnected,
}

impl RouteOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, RouteOutcome::Connected(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCountry {
    pub code: String,
    pub name: String,
    pub population: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStats {
    pub region: String,
    pub countries_count: usize,
    pub total_population: u64,
    pub average_population: f64,
    pub unique_languages_count: usize,
    pub top5_by_population: Vec<RankedCountry>,
}

/// Optional search predicates; `None` (or an empty language list) disables
/// the corresponding filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub min_population: Option<u64>,
    pub max_population: Option<u64>,
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRef {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub total: usize,
    pub results: Vec<CountryRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryListing {
    pub code: String,
    pub name: String,
    pub region: String,
    pub population: u64,
    pub capital: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryPage {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub results: Vec<CountryListing>,
}
