use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

use crate::types::RequestContext;

pub const DEFAULT_STANDINGS_URL: &str = "http://games.espn.go.com/flb/standings";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeagueConfig {
    pub league_id: String,
    pub season_id: String,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            league_id: "183180".to_string(),
            season_id: "2016".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapingConfig {
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STANDINGS_URL.to_string(),
            user_agent: "Mozilla/5.0 (compatible; FantasyStandings/0.1)".to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScraperConfig {
    pub league: LeagueConfig,
    pub scraping: ScrapingConfig,
    pub output: OutputConfig,
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let mut config = Self::default();

        if let Ok(league_id) = env::var("FANTASY_LEAGUE_ID") {
            config.league.league_id = league_id;
        }
        if let Ok(season_id) = env::var("FANTASY_SEASON_ID") {
            config.league.season_id = season_id;
        }
        if let Ok(base_url) = env::var("STANDINGS_URL") {
            config.scraping.base_url = base_url;
        }
        if let Ok(user_agent) = env::var("SCRAPER_USER_AGENT") {
            config.scraping.user_agent = user_agent;
        }
        if let Some(timeout) = env::var("SCRAPER_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse::<u64>().ok())
        {
            config.scraping.request_timeout_secs = timeout;
        }
        if let Ok(dir) = env::var("OUTPUT_DIR") {
            config.output.output_dir = PathBuf::from(dir);
        }

        config
    }

    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(&self.league.league_id, &self.league.season_id)
    }
}
