use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rift_insight::config::AnalyzerConfig;
use rift_insight::models::{Analysis, MatchId, MatchRecord, PlayerId, TimelineRecord};
use rift_insight::pipeline::{analyze_match, analyze_player};
use rift_insight::storage::{read_matches, read_timelines, write_report, JsonlReader, JsonlWriter};

#[derive(Parser)]
#[command(name = "rift-insight")]
#[command(about = "Player-performance analytics over completed ranked matches")]
#[command(version)]
struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every match for one player and write the aggregate report
    Analyze {
        /// Match records, one JSON object per line
        #[arg(long)]
        matches: PathBuf,

        /// Timelines, one JSON object per line
        #[arg(long)]
        timelines: Option<PathBuf>,

        /// Player puuid
        #[arg(long)]
        player: String,

        /// Report destination (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also write per-game analyses as JSONL
        #[arg(long)]
        games_output: Option<PathBuf>,

        /// Reference instant for the recent-performance window (RFC 3339)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Analyze a single match and print it as JSON
    Game {
        #[arg(long)]
        matches: PathBuf,

        #[arg(long)]
        timelines: Option<PathBuf>,

        #[arg(long)]
        player: String,

        #[arg(long)]
        match_id: String,
    },

    /// Configuration utilities
    Config {
        /// Validate and print the effective configuration
        #[arg(long)]
        check: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(cli.json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!cli.json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting rift-insight v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            matches,
            timelines,
            player,
            output,
            games_output,
            as_of,
        } => {
            let as_of = match as_of {
                Some(s) => DateTime::parse_from_rfc3339(&s)
                    .with_context(|| format!("Invalid --as-of timestamp: {}", s))?
                    .with_timezone(&Utc),
                None => Utc::now(),
            };

            let records = read_matches(&matches)
                .with_context(|| format!("Failed to read matches from {:?}", matches))?;
            let timelines = load_timelines(timelines.as_deref())?;
            let player = PlayerId::new(player);

            let analysis = analyze_player(&records, &timelines, &player, as_of, &config);

            if let Some(path) = games_output {
                let games = analysis.report().map(|r| r.games.as_slice()).unwrap_or_default();
                let count = JsonlWriter::new(path.clone())
                    .write_all(games)
                    .with_context(|| format!("Failed to write games to {:?}", path))?;
                tracing::info!("Wrote {} game analyses", count);
            }

            match output {
                Some(path) => write_report(&path, &analysis)
                    .with_context(|| format!("Failed to write report to {:?}", path))?,
                None => println!("{}", serde_json::to_string_pretty(&analysis)?),
            }

            print_summary(&analysis);
        }

        Commands::Game {
            matches,
            timelines,
            player,
            match_id,
        } => {
            let match_id = MatchId::new(match_id);
            let mut found = JsonlReader::new(matches.clone())
                .read_where(|m: &MatchRecord| m.id() == &match_id)
                .with_context(|| format!("Failed to read matches from {:?}", matches))?;
            let Some(record) = found.pop() else {
                bail!("Match {} not found in {:?}", match_id, matches);
            };

            let timelines = load_timelines(timelines.as_deref())?;
            let player = PlayerId::new(player);

            let game = analyze_match(&record, timelines.get(&match_id), &player, &config)
                .with_context(|| format!("Failed to analyze match {}", match_id))?;
            println!("{}", serde_json::to_string_pretty(&game)?);
        }

        Commands::Config { check } => {
            if check {
                config.validate().context("Configuration is invalid")?;
                eprintln!("Configuration OK");
            }
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(path) => AnalyzerConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path)),
        None => Ok(AnalyzerConfig::default()),
    }
}

fn load_timelines(path: Option<&Path>) -> Result<HashMap<MatchId, TimelineRecord>> {
    match path {
        Some(path) => read_timelines(path)
            .with_context(|| format!("Failed to read timelines from {:?}", path)),
        None => Ok(HashMap::new()),
    }
}

fn print_summary(analysis: &Analysis) {
    match analysis {
        Analysis::NothingToAnalyze { skipped } => {
            eprintln!("\n=== Nothing to analyze ===");
            eprintln!("Skipped matches:  {}", skipped.len());
        }
        Analysis::Report(report) => {
            eprintln!("\n=== Analysis Results ===");
            eprintln!("Games:            {}", report.summary.games);
            eprintln!("Win rate:         {:.1}%", report.summary.win_rate * 100.0);
            eprintln!("Average KDA:      {:.2}", report.summary.avg_kda);
            eprintln!("Primary role:     {}", report.primary_role);
            eprintln!("Skipped matches:  {}", report.skipped.len());
            eprintln!("Verdict:          {}", report.you_vs_team.classification);
        }
    }
}
