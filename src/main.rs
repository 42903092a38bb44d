//! Quotebox CLI - serve, seed and inspect the quote database

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quotebox::config::{self, QuoteboxConfig};
use quotebox::seed;
use quotebox::storage::QuoteStore;

#[derive(Parser)]
#[command(name = "quotebox")]
#[command(version)]
#[command(about = "Quote machine - CRUD JSON API and web page for show quotes")]
#[command(long_about = r#"
Quotebox serves quotes from the show over a JSON API and a single web page.

Example usage:
  quotebox init
  quotebox seed --file quotes.txt
  quotebox serve --port 5000
  quotebox random
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (default: quotebox.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Load quotes from a "Character: quote text" file
    Seed {
        /// Path to the quotes file
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Delete all existing quotes before loading
        #[arg(long)]
        clear: bool,
    },

    /// Show statistics about the quote database
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Print one random quote
    Random {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Write a starter quotebox.toml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

/// Flag beats config beats built-in default
fn resolve_database(flag: Option<PathBuf>, config: &QuoteboxConfig) -> PathBuf {
    flag.or_else(|| config.database.as_ref().map(PathBuf::from))
        .unwrap_or_else(config::default_database_path)
}

fn open_store(path: &Path, config: &QuoteboxConfig) -> anyhow::Result<QuoteStore> {
    config::ensure_db_dir(path)?;
    let store = QuoteStore::open(path)?.with_limits(config.page_limits());
    Ok(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Serve { port, database } => {
            let db_path = resolve_database(database, &config);
            let port = port.or(config.port).unwrap_or(config::DEFAULT_PORT);

            let store = open_store(&db_path, &config)?;
            tracing::info!("Serving quotes from {:?}", db_path);
            quotebox::server::start_server(port, store).await?;
        }

        Commands::Seed { file, database, clear } => {
            let db_path = resolve_database(database, &config);
            let store = open_store(&db_path, &config)?;

            println!("📥 Loading quotes from {:?}", file);
            let stats = seed::load_quotes_from_path(&store, &file, clear)?;

            println!("✅ {}", stats);
            println!("🗄️  Database: {:?}", db_path);
        }

        Commands::Stats { database } => {
            let db_path = resolve_database(database, &config);
            let store = open_store(&db_path, &config)?;
            let stats = store.stats()?;

            println!("📊 Quotebox Statistics ({:?})", db_path);
            println!("------------------------------------");
            println!("{}", stats);
        }

        Commands::Random { database } => {
            let db_path = resolve_database(database, &config);
            let store = open_store(&db_path, &config)?;

            match store.random_quote()? {
                Some(quote) => println!("{}", quote),
                None => println!("∅ No quotes in the database."),
            }
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            let starter = QuoteboxConfig {
                database: Some(config::default_database_path().display().to_string()),
                port: Some(config::DEFAULT_PORT),
                ..QuoteboxConfig::default()
            };
            config::write_config(&path, &starter, force)?;
            println!("✅ Wrote config to {:?}", path);
        }
    }

    Ok(())
}
