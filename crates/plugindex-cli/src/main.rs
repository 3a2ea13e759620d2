//! plugindex - plugin listing metadata collector
//!
//! Fetches title, description, author, icon, and supported game versions
//! for plugin listing URLs across Modrinth, SpigotMC, Hangar, and
//! CurseForge, and keeps a local SQLite database of confirmed records
//! fresh.

use anyhow::Result;
use clap::Parser;
use plugindex_core::{AppConfig, RecordStore};
use plugindex_db::Database;
use plugindex_fetch::{Attribute, FetchError, Fetcher};
use plugindex_refresh::RefreshDriver;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Exit code for a URL that does not belong to any supported platform.
const EXIT_INVALID_URL: u8 = 2;
/// Exit code for a resolvable URL whose attribute could not be obtained.
const EXIT_MISS: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "plugindex", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch all attributes for a listing URL and print the record as JSON
    Fetch(FetchArgs),

    /// Fetch a single attribute for a listing URL
    Attr(AttrArgs),

    /// List stored records
    List(ListArgs),

    /// Re-fetch every stored record on a fixed interval, forever
    Refresh,
}

#[derive(clap::Args, Debug)]
struct FetchArgs {
    /// The plugin listing URL
    #[arg(value_name = "URL")]
    url: String,

    /// Persist the fetched record to the database
    #[arg(long)]
    confirm: bool,
}

#[derive(clap::Args, Debug)]
struct AttrArgs {
    /// Which attribute to fetch
    #[arg(value_name = "ATTRIBUTE", value_parser = parse_attribute)]
    attribute: Attribute,

    /// The plugin listing URL
    #[arg(value_name = "URL")]
    url: String,
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    /// Only records belonging to this owner
    #[arg(long, value_name = "OWNER")]
    owner: Option<String>,
}

fn parse_attribute(s: &str) -> std::result::Result<Attribute, String> {
    Attribute::ALL
        .into_iter()
        .find(|a| a.as_str() == s)
        .ok_or_else(|| {
            let names: Vec<&str> = Attribute::ALL.iter().map(Attribute::as_str).collect();
            format!("unknown attribute '{s}', expected one of: {}", names.join(", "))
        })
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,plugindex=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let config = AppConfig::load_with_env()?;

    match cli.command {
        Commands::Fetch(args) => fetch(&config, &args).await,
        Commands::Attr(args) => attr(&config, &args).await,
        Commands::List(args) => list(&config, &args).await,
        Commands::Refresh => refresh(&config).await,
    }
}

async fn fetch(config: &AppConfig, args: &FetchArgs) -> Result<ExitCode> {
    let fetcher = Fetcher::new(config)?;
    let record = match fetcher.fetch_plugin(&args.url).await {
        Ok(record) => record,
        Err(FetchError::InvalidUrl(url)) => {
            eprintln!("unsupported listing URL: {url}");
            return Ok(ExitCode::from(EXIT_INVALID_URL));
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", serde_json::to_string_pretty(&record)?);

    if args.confirm {
        let db = Database::open(config.database_path()?).await?;
        fetcher.confirm(record, &db).await?;
        info!("record saved");
        db.close().await;
    }

    Ok(ExitCode::SUCCESS)
}

async fn attr(config: &AppConfig, args: &AttrArgs) -> Result<ExitCode> {
    let fetcher = Fetcher::new(config)?;
    match fetcher.fetch_attribute(&args.url, args.attribute).await {
        Ok(Some(value)) => {
            println!("{value}");
            Ok(ExitCode::SUCCESS)
        }
        Ok(None) => Ok(ExitCode::from(EXIT_MISS)),
        Err(FetchError::InvalidUrl(url)) => {
            eprintln!("unsupported listing URL: {url}");
            Ok(ExitCode::from(EXIT_INVALID_URL))
        }
        Err(e) => Err(e.into()),
    }
}

async fn list(config: &AppConfig, args: &ListArgs) -> Result<ExitCode> {
    let db = Database::open(config.database_path()?).await?;
    let records = match &args.owner {
        Some(owner) => db.list_by_owner(owner).await?,
        None => db.list_all().await?,
    };
    println!("{}", serde_json::to_string_pretty(&records)?);
    db.close().await;
    Ok(ExitCode::SUCCESS)
}

async fn refresh(config: &AppConfig) -> Result<ExitCode> {
    let fetcher = Arc::new(Fetcher::new(config)?);
    let db = Database::open(config.database_path()?).await?;
    let store: Arc<dyn RecordStore> = Arc::new(db);

    info!(
        interval_secs = config.refresh.interval_secs,
        "starting refresh loop"
    );
    let driver = RefreshDriver::new(
        fetcher,
        store,
        Duration::from_secs(config.refresh.interval_secs),
        Duration::from_secs(config.refresh.cooldown_secs),
    );
    driver.run().await;
    unreachable!("refresh loop never returns");
}
