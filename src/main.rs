//! # Geoindice CLI
//!
//! The `geoindice` binary administers and queries the indice store and runs
//! the HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! geoindice --config ./config/geoindice.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `geoindice init` | Create the SQLite database and schema |
//! | `geoindice seed` | Load the sample corpus if the store is empty |
//! | `geoindice list` | List indices, optionally filtered |
//! | `geoindice random` | Print one randomly sampled indice |
//! | `geoindice add` | Insert a new indice |
//! | `geoindice count` | Print the number of stored indices |
//! | `geoindice serve` | Start the JSON HTTP server |

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use geoindice::config;
use geoindice::db;
use geoindice::models::{GeoIndice, IndiceFilter};
use geoindice::schema;
use geoindice::seed;
use geoindice::server;
use geoindice::service::QueryService;

/// Geoindice CLI, a geography-tip lookup service.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/geoindice.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "geoindice",
    about = "Geoindice — query and add geography-tip records",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/geoindice.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the indice, keyword, and
    /// indice_keyword tables. Idempotent: running it multiple times is
    /// safe.
    Init,

    /// Load the built-in sample corpus if the store is empty.
    ///
    /// A populated store is left untouched, so reruns are safe.
    Seed,

    /// List indices, optionally filtered.
    ///
    /// Filters match case-insensitively as substrings and combine with AND.
    List {
        /// Match against the country field.
        #[arg(long)]
        country: Option<String>,

        /// Match against the region field.
        #[arg(long)]
        region: Option<String>,

        /// Match against the category field.
        #[arg(long)]
        category: Option<String>,

        /// Match against the content or any keyword.
        #[arg(long)]
        query: Option<String>,
    },

    /// Print one randomly sampled indice.
    Random,

    /// Insert a new indice.
    Add {
        #[arg(long)]
        country: String,

        #[arg(long)]
        region: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        content: String,

        /// Keyword to associate (repeatable).
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },

    /// Print the number of stored indices.
    Count,

    /// Start the JSON HTTP server.
    ///
    /// Runs schema creation and seed-on-empty before accepting traffic.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let pool = db::connect(&cfg).await?;
            schema::ensure_schema(&pool).await?;
            pool.close().await;
            println!("Database initialized successfully.");
        }
        Commands::Seed => {
            let pool = db::connect(&cfg).await?;
            schema::ensure_schema(&pool).await?;
            let inserted = seed::seed_if_empty(&pool, &seed::initial_corpus()).await?;
            pool.close().await;
            if inserted > 0 {
                println!("Seeded {inserted} indices.");
            } else {
                println!("Store already populated; nothing to do.");
            }
        }
        Commands::List {
            country,
            region,
            category,
            query,
        } => {
            let pool = db::connect(&cfg).await?;
            let service = QueryService::new(pool);
            let filter = IndiceFilter {
                country,
                region,
                category,
                query,
            };
            let indices = service.list_filtered(filter).await?;
            if indices.is_empty() {
                println!("No results.");
            } else {
                for indice in &indices {
                    print_indice(indice);
                }
            }
        }
        Commands::Random => {
            let pool = db::connect(&cfg).await?;
            let service = QueryService::new(pool);
            match service.get_random_one().await? {
                Some(indice) => print_indice(&indice),
                None => println!("No indices."),
            }
        }
        Commands::Add {
            country,
            region,
            category,
            content,
            keywords,
        } => {
            let pool = db::connect(&cfg).await?;
            let service = QueryService::new(pool);
            let id = service
                .add_one(&GeoIndice {
                    country,
                    region,
                    category,
                    content,
                    keywords,
                })
                .await?;
            println!("Inserted indice #{id}");
        }
        Commands::Count => {
            let pool = db::connect(&cfg).await?;
            let service = QueryService::new(pool);
            let total = service.count().await?;
            println!("{total} indices");
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}

fn print_indice(indice: &GeoIndice) {
    println!(
        "{} — {} — {}",
        indice.country, indice.region, indice.category
    );
    println!("  {}", indice.content);
    if !indice.keywords.is_empty() {
        println!("  keywords: {}", indice.keywords.join(", "));
    }
}
