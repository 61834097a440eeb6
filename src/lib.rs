//! Autivo: country reference analytics
//!
//! This crate turns raw country records from a data provider into relationship
//! and statistical views:
//!
//! 1. **Normalization** -- Lenient conversion of provider records (any field may
//!    be missing or malformed) into a canonical [`models::CountryRecord`]
//! 2. **Border routes** -- Breadth-first shortest land route over the
//!    border-adjacency graph
//! 3. **Neighborhoods** -- Combined population of a country and its neighbors,
//!    plus the languages it shares with each one
//! 4. **Regional statistics** -- Counts, population totals and averages,
//!    language variety, and a population ranking
//! 5. **Search** -- Conjunctive filtering on region, population bounds and
//!    spoken languages, ordered by name
//!
//! # Architecture
//!
//! - **Pure core** -- [`normalize`], [`graph`], [`neighbors`], [`region`] and
//!   [`search`] are synchronous functions over in-memory records; they do no
//!   I/O and keep no state between calls
//! - **Provider seam** -- [`provider::CountryProvider`] supplies raw records;
//!   [`provider::JsonFileProvider`] serves a restcountries-style JSON snapshot
//! - **Service** -- [`service::CountryService`] fetches, normalizes and runs the
//!   analytics for one request, logging through `tracing`
//!
//! # Key Modules
//!
//! - [`models`] -- Raw and canonical records, result types
//! - [`normalize`] -- Record normalization and field extraction
//! - [`graph`] -- Adjacency graph and route search
//! - [`neighbors`] -- Neighbor summaries and shared languages
//! - [`region`] -- Regional aggregation
//! - [`search`] -- Search filter and country listing
//! - [`error`] -- Error kinds surfaced to callers
//! - [`provider`] -- Record sources
//! - [`service`] -- Request orchestration
//! - [`config`] -- Constants and provider configuration
//!
//! # Example Usage
//!
//! ```bash
//! autivo --dataset countries.json route --from DEU --to ESP
//! autivo --dataset countries.json neighbors FRA
//! autivo --dataset countries.json region-stats Europe
//! autivo --dataset countries.json search --region Europe --language en --min-population 100
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod neighbors;
pub mod normalize;
pub mod provider;
pub mod region;
pub mod search;
pub mod service;
