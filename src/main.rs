use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use moodpulse::config::Config;
use moodpulse::delta::store::{JsonDirSnapshotStore, SnapshotStore};
use moodpulse::items::{ContentItem, SourceRegistry};
use moodpulse::output::terminal;
use moodpulse::pipeline;
use moodpulse::topics::traits::KeywordTitleEnricher;

/// Moodpulse: deduplicate a news stream, score its mood, and find what's trending.
#[derive(Parser)]
#[command(name = "moodpulse", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JSON file of content items and compare against yesterday
    Analyze {
        /// Path to a JSON array of content items
        input: PathBuf,

        /// Date key for this run (default: today, UTC)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Print the analysis as JSON instead of the colored report
        #[arg(long)]
        json: bool,

        /// Don't save today's snapshot
        #[arg(long)]
        no_save: bool,
    },

    /// Show a stored daily snapshot
    ShowSnapshot {
        /// Date of the snapshot (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("moodpulse=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze {
            input,
            date,
            json,
            no_save,
        } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let mut items: Vec<ContentItem> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of items", input.display()))?;
            items.iter_mut().for_each(ContentItem::ensure_id);
            info!(items = items.len(), path = %input.display(), "Loaded items");

            let now = Utc::now();
            let date = date.unwrap_or_else(|| now.date_naive());
            let store = JsonDirSnapshotStore::new(&config.snapshot_dir);

            let (analysis, _snapshot) = pipeline::run_day(
                &store,
                &KeywordTitleEnricher,
                items,
                &SourceRegistry::default(),
                &config,
                date,
                now,
                !no_save,
            )
            .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                terminal::display_analysis(&analysis);
                if !no_save {
                    println!(
                        "{}",
                        format!("Snapshot saved to {}", store.dir().display()).dimmed()
                    );
                }
            }
        }

        Commands::ShowSnapshot { date } => {
            let store = JsonDirSnapshotStore::new(&config.snapshot_dir);
            match store.load(date)? {
                Some(snapshot) => terminal::display_snapshot(&snapshot),
                None => println!("No valid snapshot for {date} in {}", store.dir().display()),
            }
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
