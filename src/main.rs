use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use adi_lookup::adi::load_adi_directory;
use adi_lookup::app::adi_match_use_case::AdiMatchUseCase;
use adi_lookup::app::enrich_use_case::EnrichUseCase;
use adi_lookup::app::fips_use_case::FipsUseCase;
use adi_lookup::app::geocode_use_case::GeocodeUseCase;
use adi_lookup::app::ports::{AddressSourcePort, RateLimiterPort};
use adi_lookup::config::{Config, DEFAULT_CONFIG_PATH};
use adi_lookup::infra::csv_address_source::CsvAddressSource;
use adi_lookup::infra::csv_output_adapter::CsvOutputAdapter;
use adi_lookup::infra::fcc_census_block::FccCensusBlockClient;
use adi_lookup::infra::google_geocoder::GoogleGeocoder;
use adi_lookup::infra::rate_limiter_adapter::JitterRateLimiter;
use adi_lookup::infra::templates::create_templates;
use adi_lookup::{logging, observability};

#[derive(Parser)]
#[command(name = "adi_lookup")]
#[command(about = "Attach census block FIPS codes and ADI rankings to postal addresses")]
#[command(version)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Geocode every address and write the ADI output file
    Run {
        /// Address CSV (street,apt_num,city,state,zip)
        #[arg(long)]
        addresses: Option<PathBuf>,
        /// Directory holding the ADI CSV downloads
        #[arg(long)]
        adi_dir: Option<PathBuf>,
        /// Directory the output CSV is written to
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Census year used for the block lookup
        #[arg(long)]
        census_year: Option<u16>,
    },
    /// Create template address file, ADI data folder and .env
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();
    observability::init_metrics();

    let cli = Cli::parse();
    let mut config = Config::load_from(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    match cli.command {
        Commands::Init => {
            let created = create_templates(&config, Path::new(".env"))?;
            if created.is_empty() {
                println!("Nothing to create; templates already exist.");
            }
            for path in created {
                println!("Created {}", path.display());
            }
            println!("Add addresses to the CSV, download ADI data into the data folder and set your API key in .env.");
        }
        Commands::Run {
            addresses,
            adi_dir,
            output_dir,
            census_year,
        } => {
            if let Some(path) = addresses {
                config.paths.addresses_file = path;
            }
            if let Some(dir) = adi_dir {
                config.paths.adi_data_dir = dir;
            }
            if let Some(dir) = output_dir {
                config.paths.output_dir = dir;
            }
            if let Some(year) = census_year {
                config.census_year = year;
            }
            run(&config).await?;
        }
    }
    Ok(())
}

async fn run(config: &Config) -> Result<()> {
    info!("Starting");
    let source = CsvAddressSource::new(&config.paths.addresses_file);
    let mut records = source.load_addresses(config.census_year).await?;
    if records.is_empty() {
        warn!("No addresses found in {}", config.paths.addresses_file.display());
        return Ok(());
    }
    info!("Got {} address(es)", records.len());

    let api_key = config.geocoder_api_key().with_context(|| {
        format!(
            "Set {} in the environment or .env (run `adi_lookup init` for a template)",
            config.geocoder.api_key_env
        )
    })?;

    let adi_dir = &config.paths.adi_data_dir;
    if !adi_dir.is_dir() {
        bail!(
            "ADI data folder not found at {} (run `adi_lookup init`, then download ADI data into it)",
            adi_dir.display()
        );
    }
    let datasets = load_adi_directory(adi_dir)?;
    if datasets.is_empty() {
        warn!("No ADI files found in {}", adi_dir.display());
        return Ok(());
    }
    info!("Got {} ADI file(s)", datasets.len());

    let limiter: Arc<dyn RateLimiterPort> =
        Arc::new(JitterRateLimiter::from_config(&config.rate_limit));
    let geocoder = Arc::new(GoogleGeocoder::new(&config.geocoder, api_key)?);
    let census = Arc::new(FccCensusBlockClient::new(&config.census_block)?);
    let output = CsvOutputAdapter::create_in(&config.paths.output_dir)?;
    let output_path = output.file_path().to_path_buf();

    let use_case = EnrichUseCase::new(
        GeocodeUseCase::new(geocoder, limiter.clone()),
        FipsUseCase::new(census, limiter),
        AdiMatchUseCase::new(Arc::new(datasets)),
        Box::new(output),
    );
    let summary = use_case.run(&mut records).await?;

    println!("\nResults:");
    println!("   Addresses: {}", summary.total_addresses);
    println!("   Ineligible for geocoding: {}", summary.ineligible);
    println!("   Geocoded: {}", summary.geocoded);
    println!("   With FIPS code: {}", summary.fips_resolved);
    println!("   With ADI ranks: {}", summary.adi_matched);
    println!("   Rows written: {}", summary.rows_written);
    println!("Wrote data to CSV file:\n    {}", output_path.display());
    Ok(())
}
