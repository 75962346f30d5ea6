//! Command-line entry point for the collection point directory.
//!
//! Opens the SQLite store, runs one use-case and prints the result as JSON.

use clap::{Parser, Subcommand};
use ecoleta_core::db::open_db;
use ecoleta_core::{
    default_log_level, init_logging, parse_item_ids, ItemRepository, LocationFilter, LocationId,
    LocationService, NewLocation, SqliteItemRepository, SqliteLocationRepository,
};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ecoleta", version, about = "Recycling collection point directory")]
struct Cli {
    /// SQLite database file; created and migrated on first use.
    #[arg(long, env = "ECOLETA_DB", default_value = "ecoleta.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "ECOLETA_LOG_DIR")]
    log_dir: Option<String>,

    #[arg(long, env = "ECOLETA_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the item categories a location can accept.
    Items,
    /// Search locations; all three filters are required to narrow results.
    Search {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        uf: Option<String>,
        /// Comma-separated item ids, e.g. `1,2`.
        #[arg(long)]
        items: Option<String>,
    },
    /// Show one location with the titles of its accepted items.
    Show { id: LocationId },
    /// Register a new location with the items it accepts.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        whatsapp: String,
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,
        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,
        #[arg(long)]
        city: String,
        #[arg(long)]
        uf: String,
        /// Comma-separated item ids, e.g. `1,2`.
        #[arg(long)]
        items: String,
    },
    /// Record an uploaded image filename for a location.
    SetImage { id: LocationId, image: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let mut conn = open_db(&cli.db)?;
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cli.command)
    );

    match cli.command {
        Commands::Items => {
            let repo = SqliteItemRepository::try_new(&conn)?;
            print_json(&repo.list_items()?)?;
        }
        Commands::Search { city, uf, items } => {
            let item_ids = items.as_deref().map(parse_item_ids).transpose()?;
            let filter = LocationFilter::from_parts(city, uf, item_ids);
            let service = LocationService::new(SqliteLocationRepository::try_new(&mut conn)?);
            print_json(&service.search(&filter)?)?;
        }
        Commands::Show { id } => {
            let service = LocationService::new(SqliteLocationRepository::try_new(&mut conn)?);
            print_json(&service.get_location(id)?)?;
        }
        Commands::Register {
            name,
            email,
            whatsapp,
            latitude,
            longitude,
            city,
            uf,
            items,
        } => {
            let input = NewLocation {
                name,
                email,
                whatsapp,
                latitude,
                longitude,
                city,
                uf,
                item_ids: parse_item_ids(&items)?.into_iter().collect(),
            };
            let mut service = LocationService::new(SqliteLocationRepository::try_new(&mut conn)?);
            print_json(&service.register(&input)?)?;
        }
        Commands::SetImage { id, image } => {
            let service = LocationService::new(SqliteLocationRepository::try_new(&mut conn)?);
            print_json(&service.set_image(id, &image)?)?;
        }
    }

    Ok(())
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Items => "items",
        Commands::Search { .. } => "search",
        Commands::Show { .. } => "show",
        Commands::Register { .. } => "register",
        Commands::SetImage { .. } => "set-image",
    }
}

fn print_json(value: &impl Serialize) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
