use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fantasy_standings_scraper::{
    config::ScraperConfig,
    fetcher::StandingsFetcher,
    league_standings::{AppendSummary, LeagueStandings},
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the standings page and append both tables to the season files
    Fetch {
        /// League to fetch (defaults to FANTASY_LEAGUE_ID)
        #[arg(long)]
        league_id: Option<String>,
        /// Season year (defaults to FANTASY_SEASON_ID)
        #[arg(long)]
        season_id: Option<String>,
        /// Directory holding the season CSV files (defaults to OUTPUT_DIR)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Also keep the raw response body at this path
        #[arg(long)]
        save_html: Option<PathBuf>,
    },
    /// Append both tables from a saved standings page
    ProcessFile {
        /// Path to the HTML file to process
        #[arg(short, long)]
        file: PathBuf,
        /// Season year (defaults to FANTASY_SEASON_ID)
        #[arg(long)]
        season_id: Option<String>,
        /// Directory holding the season CSV files (defaults to OUTPUT_DIR)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

fn append_both(standings: &LeagueStandings, output_dir: &Path) -> Result<()> {
    let summaries = standings
        .append_all(output_dir)
        .context("Failed to append snapshot")?;
    for summary in &summaries {
        report(summary);
    }
    Ok(())
}

fn report(summary: &AppendSummary) {
    info!(
        "{}: appended {} rows, {} total in {:?}",
        summary.kind, summary.appended, summary.total, summary.path
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ScraperConfig::from_env();

    match cli.command {
        Commands::Fetch {
            league_id,
            season_id,
            output_dir,
            save_html,
        } => {
            if let Some(league_id) = league_id {
                config.league.league_id = league_id;
            }
            if let Some(season_id) = season_id {
                config.league.season_id = season_id;
            }
            if let Some(output_dir) = output_dir {
                config.output.output_dir = output_dir;
            }

            let fetcher = StandingsFetcher::new(&config.scraping)?;
            let context = config.request_context();
            let standings = LeagueStandings::fetch(&fetcher, context)
                .with_context(|| format!("Failed to fetch {}", fetcher.base_url()))?;

            if let Some(path) = save_html {
                fs::write(&path, standings.html())
                    .with_context(|| format!("Failed to save HTML to {:?}", path))?;
                info!("Saved HTML response to {:?}", path);
            }

            info!("Processing '{}' from {}", standings.title(), standings.url());
            append_both(&standings, &config.output.output_dir)?;
        }
        Commands::ProcessFile {
            file,
            season_id,
            output_dir,
        } => {
            if let Some(season_id) = season_id {
                config.league.season_id = season_id;
            }
            if let Some(output_dir) = output_dir {
                config.output.output_dir = output_dir;
            }

            let html = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            info!("Processing saved page {:?}", file);

            let standings = LeagueStandings::from_html(
                config.request_context(),
                file.display().to_string(),
                &html,
            )?;
            append_both(&standings, &config.output.output_dir)?;
        }
    }

    Ok(())
}
