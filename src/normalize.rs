//! Conversion of provider records into [`CountryRecord`].
//!
//! Normalization never fails: missing or malformed fields fall back to empty
//! strings, empty collections and a population of zero.

use crate::models::{CountryRecord, RawCountry};
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Three-letter code, falling back to the two-letter code
pub fn extract_code(raw: &RawCountry) -> String {
    non_empty(raw.cca3.as_ref())
        .or_else(|| non_empty(raw.cca2.as_ref()))
        .unwrap_or_default()
        .to_string()
}

/// Common name, falling back to the official name
pub fn extract_display_name(raw: &RawCountry) -> String {
    raw.name
        .as_ref()
        .and_then(|n| non_empty(n.common.as_ref()).or_else(|| non_empty(n.official.as_ref())))
        .unwrap_or_default()
        .to_string()
}

/// Distinct language display names, used for overlap comparison
pub fn extract_language_names(raw: &RawCountry) -> BTreeSet<String> {
    raw.languages
        .as_ref()
        .map(|langs| langs.values().cloned().collect())
        .unwrap_or_default()
}

/// Border codes with repeats removed, first occurrence kept
pub fn extract_borders(raw: &RawCountry) -> Vec<String> {
    let mut seen = FxHashSet::default();
    raw.borders
        .iter()
        .flatten()
        .filter(|code| seen.insert(*code))
        .cloned()
        .collect()
}

pub fn normalize(raw: &RawCountry) -> CountryRecord {
    CountryRecord {
        code: extract_code(raw),
        name: extract_display_name(raw),
        region: raw.region.clone().unwrap_or_default(),
        population: raw.population.unwrap_or(0),
        capital: raw.capital.clone().unwrap_or_default(),
        borders: extract_borders(raw),
        languages: raw.languages.clone().unwrap_or_default(),
    }
}

pub fn normalize_all(raws: &[RawCountry]) -> Vec<CountryRecord> {
    raws.iter().map(normalize).collect()
}

impl CountryRecord {
    /// Same set [`extract_language_names`] yields for the raw record
    pub fn language_names(&self) -> BTreeSet<&str> {
        self.languages.values().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawName;
    use std::collections::BTreeMap;

    fn raw(cca3: Option<&str>, cca2: Option<&str>) -> RawCountry {
        RawCountry {
            cca3: cca3.map(String::from),
            cca2: cca2.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn code_prefers_cca3() {
        assert_eq!(extract_code(&raw(Some("FRA"), Some("FR"))), "FRA");
    }

    #[test]
    fn code_falls_back_to_cca2() {
        assert_eq!(extract_code(&raw(None, Some("FR"))), "FR");
        assert_eq!(extract_code(&raw(Some(""), Some("FR"))), "FR");
    }

    #[test]
    fn code_missing_is_empty() {
        assert_eq!(extract_code(&raw(None, None)), "");
    }

    #[test]
    fn display_name_fallbacks() {
        let mut r = RawCountry::default();
        assert_eq!(extract_display_name(&r), "");

        r.name = Some(RawName {
            common: None,
            official: Some("French Republic".into()),
        });
        assert_eq!(extract_display_name(&r), "French Republic");

        r.name = Some(RawName {
            common: Some("France".into()),
            official: Some("French Republic".into()),
        });
        assert_eq!(extract_display_name(&r), "France");

        r.name = Some(RawName {
            common: Some(String::new()),
            official: Some("French Republic".into()),
        });
        assert_eq!(extract_display_name(&r), "French Republic");
    }

    #[test]
    fn language_names_are_deduplicated() {
        let mut langs = BTreeMap::new();
        langs.insert("eng".to_string(), "English".to_string());
        langs.insert("en".to_string(), "English".to_string());
        langs.insert("fra".to_string(), "French".to_string());
        let r = RawCountry {
            languages: Some(langs),
            ..Default::default()
        };

        let names = extract_language_names(&r);
        assert_eq!(names.len(), 2);
        assert!(names.contains("English"));
        assert!(names.contains("French"));

        let record = normalize(&r);
        let record_names: BTreeSet<String> =
            record.language_names().into_iter().map(String::from).collect();
        assert_eq!(record_names, names);
    }

    #[test]
    fn borders_drop_repeats_in_order() {
        let r = RawCountry {
            borders: Some(vec!["DEU".into(), "ESP".into(), "DEU".into(), "BEL".into(), "ESP".into()]),
            ..Default::default()
        };
        assert_eq!(normalize(&r).borders, vec!["DEU", "ESP", "BEL"]);
        assert!(extract_borders(&RawCountry::default()).is_empty());
    }

    #[test]
    fn normalize_keeps_whole_float_population() {
        let r: RawCountry =
            serde_json::from_str(r#"{"cca3": "FRA", "population": 67000000.0}"#).unwrap();
        assert_eq!(normalize(&r).population, 67_000_000);
    }

    #[test]
    fn normalize_defaults_everything() {
        let record = normalize(&RawCountry::default());
        assert_eq!(record, CountryRecord::default());
        assert_eq!(record.population, 0);
        assert!(record.borders.is_empty());
        assert!(record.languages.is_empty());
    }

    #[test]
    fn normalize_copies_fields() {
        let r = RawCountry {
            name: Some(RawName {
                common: Some("Germany".into()),
                official: None,
            }),
            cca3: Some("DEU".into()),
            region: Some("Europe".into()),
            population: Some(83_000_000),
            capital: Some(vec!["Berlin".into()]),
            borders: Some(vec!["FRA".into(), "POL".into()]),
            ..Default::default()
        };
        let record = normalize(&r);
        assert_eq!(record.code, "DEU");
        assert_eq!(record.name, "Germany");
        assert_eq!(record.region, "Europe");
        assert_eq!(record.population, 83_000_000);
        assert_eq!(record.capital, vec!["Berlin"]);
        assert_eq!(record.borders, vec!["FRA", "POL"]);
    }
}
