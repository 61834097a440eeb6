use crate::config::{AVERAGE_SCALE, TOP_POPULATION_LIMIT};
use crate::error::{AtlasError, Result};
use crate::models::{CountryRecord, RankedCountry, RegionStats};
use rustc_hash::FxHashSet;

/// Mean of `total` over `count`, rounded half up to two decimals.
///
/// Done in integer hundredths so values like 0.125 round to 0.13 exactly
/// instead of depending on their binary float representation.
pub fn average_half_up(total: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let count = count as u128;
    let scaled = total as u128 * AVERAGE_SCALE;
    let hundredths = (2 * scaled + count) / (2 * count);
    hundredths as f64 / AVERAGE_SCALE as f64
}

/// Aggregates records that already belong to `region`.
///
/// Language variety counts distinct lower-cased language codes. The ranking
/// is a stable sort on population, so ties keep input order.
pub fn aggregate_region(region: &str, records: &[CountryRecord]) -> Result<RegionStats> {
    if records.is_empty() {
        return Err(AtlasError::EmptyRegion {
            region: region.to_string(),
        });
    }

    let total_population: u64 = records
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.population));

    let language_codes: FxHashSet<String> = records
        .iter()
        .flat_map(|r| r.languages.keys())
        .map(|code| code.to_lowercase())
        .collect();

    let mut ranked: Vec<&CountryRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.population.cmp(&a.population));

    let top5_by_population = ranked
        .into_iter()
        .take(TOP_POPULATION_LIMIT)
        .map(|r| RankedCountry {
            code: r.code.clone(),
            name: r.name.clone(),
            population: r.population,
        })
        .collect();

    Ok(RegionStats {
        region: region.to_string(),
        countries_count: records.len(),
        total_population,
        average_population: average_half_up(total_population, records.len()),
        unique_languages_count: language_codes.len(),
        top5_by_population,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, population: u64, langs: &[&str]) -> CountryRecord {
        CountryRecord {
            code: code.to_string(),
            name: format!("{} name", code),
            population,
            languages: langs
                .iter()
                .map(|l| (l.to_string(), format!("{} language", l)))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn basic_totals() {
        let records = vec![
            record("AAA", 10, &[]),
            record("BBB", 20, &[]),
            record("CCC", 30, &[]),
        ];
        let stats = aggregate_region("Test", &records).unwrap();
        assert_eq!(stats.region, "Test");
        assert_eq!(stats.countries_count, 3);
        assert_eq!(stats.total_population, 60);
        assert_eq!(stats.average_population, 20.00);
        let pops: Vec<u64> = stats.top5_by_population.iter().map(|c| c.population).collect();
        assert_eq!(pops, vec![30, 20, 10]);
    }

    #[test]
    fn empty_region_is_an_error() {
        match aggregate_region("Atlantis", &[]) {
            Err(AtlasError::EmptyRegion { region }) => assert_eq!(region, "Atlantis"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn top_five_truncates_and_keeps_tie_order() {
        let records = vec![
            record("A", 5, &[]),
            record("B", 50, &[]),
            record("C", 5, &[]),
            record("D", 40, &[]),
            record("E", 5, &[]),
            record("F", 30, &[]),
            record("G", 1, &[]),
        ];
        let stats = aggregate_region("R", &records).unwrap();
        let codes: Vec<&str> = stats.top5_by_population.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["B", "D", "F", "A", "C"]);
    }

    #[test]
    fn fewer_than_five_countries() {
        let stats = aggregate_region("R", &[record("A", 1, &[])]).unwrap();
        assert_eq!(stats.top5_by_population.len(), 1);
        assert_eq!(stats.average_population, 1.0);
    }

    #[test]
    fn language_codes_are_case_folded() {
        let records = vec![
            record("A", 1, &["eng", "fra"]),
            record("B", 1, &["ENG"]),
            record("C", 1, &["deu"]),
        ];
        let stats = aggregate_region("R", &records).unwrap();
        assert_eq!(stats.unique_languages_count, 3);
    }

    #[test]
    fn language_count_uses_codes_not_names() {
        let mut a = record("A", 1, &[]);
        a.languages.insert("eng".into(), "English".into());
        let mut b = record("B", 1, &[]);
        b.languages.insert("en".into(), "English".into());
        let stats = aggregate_region("R", &[a, b]).unwrap();
        assert_eq!(stats.unique_languages_count, 2);
    }

    #[test]
    fn average_rounds_half_up() {
        // 1 / 8 = 0.125 exactly
        assert_eq!(average_half_up(1, 8), 0.13);
        // 1 / 3 = 0.333...
        assert_eq!(average_half_up(1, 3), 0.33);
        // 2 / 3 = 0.666...
        assert_eq!(average_half_up(2, 3), 0.67);
        // 5 / 200 = 0.025
        assert_eq!(average_half_up(5, 200), 0.03);
        assert_eq!(average_half_up(0, 4), 0.0);
        assert_eq!(average_half_up(7, 0), 0.0);
    }

    #[test]
    fn average_with_world_scale_population() {
        let avg = average_half_up(8_000_000_000, 3);
        assert_eq!(avg, 2_666_666_666.67);
    }
}
