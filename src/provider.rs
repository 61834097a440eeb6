//! Sources of raw country records.
//!
//! The analytics never talk to a data source directly; they receive records a
//! [`CountryProvider`] already fetched.

use crate::config::ProviderConfig;
use crate::models::RawCountry;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use tracing::{debug, info};

pub trait CountryProvider {
    fn all_countries(&self) -> Result<Vec<RawCountry>>;

    /// Lookup by three- or two-letter code, case-insensitive
    fn country_by_code(&self, code: &str) -> Result<Option<RawCountry>>;

    /// Records for `codes` in request order; unknown codes are skipped
    fn countries_by_codes(&self, codes: &[String]) -> Result<Vec<RawCountry>>;

    fn countries_in_region(&self, region: &str) -> Result<Vec<RawCountry>>;
}

fn code_matches(raw: &RawCountry, code: &str) -> bool {
    [raw.cca3.as_deref(), raw.cca2.as_deref()]
        .into_iter()
        .flatten()
        .any(|c| !c.is_empty() && c.eq_ignore_ascii_case(code))
}

/// Serves a restcountries-style JSON snapshot loaded from disk.
pub struct JsonFileProvider {
    countries: Vec<RawCountry>,
}

impl JsonFileProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let path = &config.dataset_path;
        let file = File::open(path)
            .with_context(|| format!("Failed to open country dataset: {}", path.display()))?;
        let countries: Vec<RawCountry> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse country dataset: {}", path.display()))?;

        info!(
            countries = countries.len(),
            path = %path.display(),
            "Country dataset loaded"
        );
        Ok(Self { countries })
    }

    pub fn from_records(countries: Vec<RawCountry>) -> Self {
        Self { countries }
    }
}

impl CountryProvider for JsonFileProvider {
    fn all_countries(&self) -> Result<Vec<RawCountry>> {
        Ok(self.countries.clone())
    }

    fn country_by_code(&self, code: &str) -> Result<Option<RawCountry>> {
        let found = self.countries.iter().find(|c| code_matches(c, code)).cloned();
        if found.is_none() {
            debug!(code, "No country with code");
        }
        Ok(found)
    }

    fn countries_by_codes(&self, codes: &[String]) -> Result<Vec<RawCountry>> {
        let found: Vec<RawCountry> = codes
            .iter()
            .filter_map(|code| self.countries.iter().find(|c| code_matches(c, code)))
            .cloned()
            .collect();
        if found.len() != codes.len() {
            debug!(
                requested = codes.len(),
                found = found.len(),
                "Some border codes are missing from the dataset"
            );
        }
        Ok(found)
    }

    fn countries_in_region(&self, region: &str) -> Result<Vec<RawCountry>> {
        let wanted = region.to_lowercase();
        Ok(self
            .countries
            .iter()
            .filter(|c| c.region.as_deref().is_some_and(|r| r.to_lowercase() == wanted))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::extract_code;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_dataset(json: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(json.as_bytes()).unwrap();
        tmp.flush().unwrap();
        tmp
    }

    const SAMPLE: &str = r#"[
        {"name": {"common": "France"}, "cca2": "FR", "cca3": "FRA", "region": "Europe", "borders": ["DEU"]},
        {"name": {"common": "Germany"}, "cca2": "DE", "cca3": "DEU", "region": "Europe", "borders": ["FRA"]},
        {"name": {"common": "Kosovo"}, "cca2": "XK", "region": "Europe"},
        {"name": {"common": "Japan"}, "cca3": "JPN", "region": "Asia"}
    ]"#;

    fn provider() -> (NamedTempFile, JsonFileProvider) {
        let tmp = write_dataset(SAMPLE);
        let provider = JsonFileProvider::new(&ProviderConfig::new(tmp.path())).unwrap();
        (tmp, provider)
    }

    #[test]
    fn loads_all_records() {
        let (_tmp, p) = provider();
        assert_eq!(p.all_countries().unwrap().len(), 4);
    }

    #[test]
    fn lookup_by_either_code_any_case() {
        let (_tmp, p) = provider();
        let fra = p.country_by_code("fra").unwrap().unwrap();
        assert_eq!(extract_code(&fra), "FRA");
        let deu = p.country_by_code("DE").unwrap().unwrap();
        assert_eq!(extract_code(&deu), "DEU");
        let xk = p.country_by_code("XK").unwrap().unwrap();
        assert_eq!(extract_code(&xk), "XK");
        assert!(p.country_by_code("ZZZ").unwrap().is_none());
    }

    #[test]
    fn codes_lookup_keeps_request_order_and_skips_unknown() {
        let (_tmp, p) = provider();
        let codes = vec!["JPN".to_string(), "NOPE".to_string(), "FRA".to_string()];
        let found = p.countries_by_codes(&codes).unwrap();
        let found: Vec<String> = found.iter().map(extract_code).collect();
        assert_eq!(found, vec!["JPN", "FRA"]);
    }

    #[test]
    fn region_lookup_is_case_insensitive() {
        let (_tmp, p) = provider();
        assert_eq!(p.countries_in_region("europe").unwrap().len(), 3);
        assert_eq!(p.countries_in_region("ASIA").unwrap().len(), 1);
        assert!(p.countries_in_region("Oceania").unwrap().is_empty());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = JsonFileProvider::new(&ProviderConfig::new("/nonexistent/countries.json"))
            .err()
            .unwrap();
        assert!(format!("{:#}", err).contains("/nonexistent/countries.json"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let tmp = write_dataset("{ not json");
        assert!(JsonFileProvider::new(&ProviderConfig::new(tmp.path())).is_err());
    }
}
