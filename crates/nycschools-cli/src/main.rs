//! `nycschools`: list NYC high schools with their SAT results.
//!
//! The first run downloads both datasets from NYC Open Data and caches the
//! merged result in SQLite; later runs read only the cache.
//!
//! # Usage
//!
//! ```
//! nycschools list
//! nycschools show 02M520 --json
//! nycschools --config ~/.config/nycschools.toml list
//! ```

mod settings;
mod output;

use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use nycschools_core::CacheFirstRepository;
use nycschools_opendata::OpenDataClient;
use nycschools_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::AppConfig;

#[derive(Parser)]
#[command(author, version, about = "NYC high schools with SAT results")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "nycschools.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// List every school, populating the cache on first use.
  List {
    /// Print JSON instead of one line per school.
    #[arg(long)]
    json: bool,
  },
  /// Show one cached school by DBN.
  Show {
    dbn:  String,
    /// Print JSON instead of labelled fields.
    #[arg(long)]
    json: bool,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
  // Logs go to stderr so listings on stdout stay pipeable.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let app_config = AppConfig::load(&cli.config)?;

  let store_path = app_config.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let client =
    OpenDataClient::new(app_config.open_data()).context("failed to build API client")?;

  let repo = CacheFirstRepository::new(Arc::new(client), Arc::new(store));

  match cli.command {
    Command::List { json } => {
      let schools = repo.load_all().await.context("failed to load schools")?;
      if json {
        println!("{}", serde_json::to_string_pretty(&schools)?);
      } else {
        for school in &schools {
          println!("{}", output::summary_line(school));
        }
      }
      tracing::info!(count = schools.len(), "listed schools");
    }
    Command::Show { dbn, json } => match repo.load_by_dbn(&dbn).await {
      Ok(school) if json => println!("{}", serde_json::to_string_pretty(&school)?),
      Ok(school) => print!("{}", output::detail(&school)),
      Err(err) if err.is_not_found() => {
        eprintln!("no cached school with DBN {dbn:?}; run `nycschools list` to populate the cache");
        return Ok(ExitCode::from(2));
      }
      Err(err) => return Err(err).context("failed to load school"),
    },
  }

  Ok(ExitCode::SUCCESS)
}
