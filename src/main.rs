use anyhow::{Context, Result};
use autivo::config::{ProviderConfig, DATASET_ENV, DEFAULT_PAGE_LIMIT};
use autivo::error::AtlasError;
use autivo::models::{RouteOutcome, SearchCriteria};
use autivo::provider::JsonFileProvider;
use autivo::service::CountryService;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "autivo")]
#[command(about = "Border routes, neighbor languages, regional statistics and search over country data")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// restcountries-style JSON dataset
    #[arg(short, long, env = DATASET_ENV)]
    dataset: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List countries ordered by name
    Countries(CountriesArgs),
    /// Neighbors of a country and the languages they share with it
    Neighbors {
        /// Country code (cca3 or cca2)
        code: String,
    },
    /// Shortest land route between two countries
    Route {
        /// Origin country code
        #[arg(long)]
        from: String,
        /// Destination country code
        #[arg(long)]
        to: String,
    },
    /// Population and language statistics for a region
    RegionStats {
        region: String,
    },
    /// Search countries by region, population and language
    Search(SearchArgs),
}

#[derive(Args)]
struct CountriesArgs {
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    limit: usize,

    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Include bordering country codes
    #[arg(long)]
    include_borders: bool,
}

#[derive(Args)]
struct SearchArgs {
    /// Inclusive lower population bound
    #[arg(long)]
    min_population: Option<u64>,

    /// Inclusive upper population bound
    #[arg(long)]
    max_population: Option<u64>,

    /// Region name (case-insensitive)
    #[arg(long)]
    region: Option<String>,

    /// Language code or name; repeat for several
    #[arg(long = "language")]
    languages: Vec<String>,
}

impl From<SearchArgs> for SearchCriteria {
    fn from(args: SearchArgs) -> Self {
        SearchCriteria {
            min_population: args.min_population,
            max_population: args.max_population,
            region: args.region,
            languages: args.languages,
        }
    }
}

#[derive(Serialize)]
struct RouteReport {
    connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hops: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl RouteReport {
    fn new(outcome: RouteOutcome, from: &str, to: &str) -> Self {
        match outcome {
            RouteOutcome::Connected(route) => RouteReport {
                connected: true,
                hops: Some(route.hops()),
                path: Some(route.path),
                message: None,
            },
            RouteOutcome::NotConnected => RouteReport {
                connected: false,
                path: None,
                hops: None,
                message: Some(format!(
                    "No land connection between {} and {}",
                    from.to_uppercase(),
                    to.to_uppercase()
                )),
            },
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", out);
    Ok(())
}

/// Exit status for a failed run: 2 when the requested country or region does
/// not exist, 1 for everything else
fn failure_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<AtlasError>() {
        Some(e) if e.is_not_found() => 2,
        _ => 1,
    }
}

fn run(cli: Cli) -> Result<()> {
    let provider = JsonFileProvider::new(&ProviderConfig::new(&cli.dataset))?;
    let service = CountryService::new(provider);

    match cli.command {
        Commands::Countries(args) => {
            print_json(&service.list_countries(args.limit, args.offset, args.include_borders)?)
        }
        Commands::Neighbors { code } => print_json(&service.neighbors(&code)?),
        Commands::Route { from, to } => {
            let outcome = service.route(&from, &to)?;
            print_json(&RouteReport::new(outcome, &from, &to))
        }
        Commands::RegionStats { region } => print_json(&service.region_stats(&region)?),
        Commands::Search(args) => print_json(&service.search(&args.into())?),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    match run(cli) {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(failure_status(&e))
        }
    }
}
