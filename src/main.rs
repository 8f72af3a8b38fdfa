use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use betpool::config::AppConfig;
use betpool::models::{AnnotatedStanding, CountryScore, StandingsReport};
use betpool::sources::{ExtraBetSource, JsonlSources, StandingsService, StandingsSource};
use betpool::storage::{InputKind, JsonlReader, JsonlWriter, StorageConfig};

#[derive(Parser)]
#[command(name = "betpool")]
#[command(about = "Betting pool standings tracker with multi-category winner detection")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error; overrides config file)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and print the annotated standings
    Standings {
        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also export the rows to <data-dir>/derived/standings.jsonl
        #[arg(long)]
        write: bool,

        /// Favorite country (overrides config file)
        #[arg(long)]
        country: Option<String>,
    },

    /// Validate the input files and report inconsistencies
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(Path::new(&cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    let fmt_layer = if cli.json_logs {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();

    tracing::info!("Starting betpool v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Standings {
            json,
            write,
            country,
        } => {
            if let Some(country) = country {
                config.favorite_country = country;
            }
            if let Err(e) = config.validate() {
                eprintln!("{}", e);
                eprintln!("Set favorite_country in {} or pass --country.", cli.config);
                std::process::exit(2);
            }

            let storage = StorageConfig::new(config.data_dir.clone());
            let sources = Arc::new(JsonlSources::new(storage.clone()));
            let service = StandingsService::new(
                config.favorite_country.as_str(),
                sources.clone(),
                sources.clone(),
                sources,
            )?;

            let report = service.report()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }

            if write {
                let path = storage.derived_dir().join("standings.jsonl");
                let writer = JsonlWriter::<AnnotatedStanding>::new(path.clone());
                let count = writer.write_all(&report.rows)?;
                println!("\nExported {} rows to {:?}", count, path);
            }
        }
        Commands::Check => {
            let storage = StorageConfig::new(config.data_dir.clone());
            let sources = JsonlSources::new(storage.clone());

            let standings = sources.standings()?;
            let extra_bets = sources.extra_bets()?;
            let country_scores: Vec<CountryScore> =
                JsonlReader::for_input(&storage, InputKind::CountryScore).read_all()?;

            println!("=== Input Check ({:?}) ===\n", storage.inputs_dir());
            println!("Standings:      {}", standings.len());
            println!("Country scores: {}", country_scores.len());
            println!("Extra bets:     {}", extra_bets.len());

            // Usernames must be unique within the standings input
            let mut seen: HashSet<&str> = HashSet::new();
            let mut duplicates: Vec<&str> = Vec::new();
            for standing in &standings {
                if !seen.insert(standing.username.as_str()) {
                    duplicates.push(standing.username.as_str());
                }
            }

            let known: HashSet<&str> = standings.iter().map(|s| s.username.as_str()).collect();
            let unknown_bonus: Vec<String> = country_scores
                .iter()
                .map(|s| s.username.as_str())
                .chain(extra_bets.iter().map(|b| b.username.as_str()))
                .filter(|u| !known.contains(u))
                .map(|u| u.to_string())
                .collect();

            if !config.favorite_country.trim().is_empty() {
                let favorite_rows = country_scores
                    .iter()
                    .filter(|s| s.country.eq_ignore_ascii_case(&config.favorite_country))
                    .count();
                println!(
                    "Rows for favorite country {}: {}",
                    config.favorite_country, favorite_rows
                );
            }

            if !unknown_bonus.is_empty() {
                println!("\nBonus rows for users missing from standings:");
                for username in &unknown_bonus {
                    println!("  - {}", username);
                }
            }

            if !duplicates.is_empty() {
                println!("\nDuplicate usernames in standings:");
                for username in &duplicates {
                    println!("  - {}", username);
                }
                std::process::exit(1);
            }

            println!("\nInputs OK.");
        }
    }

    Ok(())
}

/// Print the report as an aligned table plus per-category winners.
fn print_report(report: &StandingsReport) {
    println!(
        "=== Standings (favorite country: {}) ===\n",
        report.favorite_country
    );

    if report.rows.is_empty() {
        println!("No standings found.");
        return;
    }

    println!(
        "  {:<16} {:>6} {:>6} {:>8} {:>6}  categories",
        "user", "total", "group", "country", "extra"
    );
    for row in &report.rows {
        println!(
            "  {:<16} {:>6} {:>6} {:>8} {:>6}  {}",
            row.username,
            row.total_points,
            row.group_points,
            optional_points(row.favorite_country_points),
            optional_points(row.extra_bet_points),
            categories(row),
        );
    }

    println!();
    print_winners("Max points", &report.max_points_candidates());
    print_winners("Min points", &report.min_points_candidates());
    print_winners("Max group points", &report.max_group_points_candidates());
    print_winners("Max country points", &report.max_country_points_candidates());
}

fn optional_points(points: Option<i32>) -> String {
    points.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string())
}

fn categories(row: &AnnotatedStanding) -> String {
    let mut flags = Vec::new();
    if row.max_points_candidate {
        flags.push("max");
    }
    if row.min_points_candidate {
        flags.push("min");
    }
    if row.max_group_points_candidate {
        flags.push("group");
    }
    if row.max_country_points_candidate {
        flags.push("country");
    }
    flags.join(", ")
}

fn print_winners(label: &str, rows: &[&AnnotatedStanding]) {
    let names: Vec<&str> = rows.iter().map(|r| r.username.as_str()).collect();
    let names = if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    };
    println!("{:<18} {}", format!("{}:", label), names);
}
