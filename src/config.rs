use std::path::PathBuf;

/// Number of countries reported in a region's population ranking
pub const TOP_POPULATION_LIMIT: usize = 5;

/// Page size used by the country listing when none is given
pub const DEFAULT_PAGE_LIMIT: usize = 250;

/// Average population is reported in hundredths (two decimal places)
pub const AVERAGE_SCALE: u128 = 100;

/// Environment variable the binary reads the dataset path from
pub const DATASET_ENV: &str = "AUTIVO_DATASET";

/// Settings handed to a [`crate::provider::JsonFileProvider`] at startup.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// restcountries-style JSON array of country records
    pub dataset_path: PathBuf,
}

impl ProviderConfig {
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
        }
    }
}
