use anyhow::Context;
use std::time::Duration;
use tracing::{debug, info};

use crate::{config::ScrapingConfig, error::Result, types::RequestContext};

/// Raw response of one standings request.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: String,
    pub body: String,
}

pub struct StandingsFetcher {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl StandingsFetcher {
    pub fn new(config: &ScrapingConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends the single POST for a league/season. No retries.
    pub fn fetch(&self, context: &RequestContext) -> Result<FetchedPage> {
        info!(
            "Requesting standings for league {} season {}",
            context.league_id(),
            context.season_id()
        );

        let response = self
            .client
            .post(&self.base_url)
            .query(&context.payload())
            .send()?
            .error_for_status()?;

        let url = response.url().to_string();
        let body = response.text()?;
        info!("Got response from {} ({} bytes)", url, body.len());
        debug!("Response body starts with {:?}", body.chars().take(80).collect::<String>());

        Ok(FetchedPage { url, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config_for(server: &mockito::Server) -> ScrapingConfig {
        ScrapingConfig {
            base_url: format!("{}/flb/standings", server.url()),
            ..ScrapingConfig::default()
        }
    }

    #[test]
    fn test_fetch_sends_league_payload() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/flb/standings")
            .match_query(Matcher::Exact(
                "leagueId=183180&seasonId=2016&view=official".into(),
            ))
            .with_status(200)
            .with_body("<html><title>Test</title></html>")
            .create();

        let fetcher = StandingsFetcher::new(&config_for(&server)).unwrap();
        let page = fetcher.fetch(&RequestContext::new("183180", "2016")).unwrap();

        mock.assert();
        assert_eq!(page.body, "<html><title>Test</title></html>");
        assert!(page.url.contains("leagueId=183180"));
        assert!(page.url.contains("seasonId=2016"));
        assert!(page.url.contains("view=official"));
    }

    #[test]
    fn test_fetch_propagates_http_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/flb/standings")
            .match_query(Matcher::Any)
            .with_status(500)
            .create();

        let fetcher = StandingsFetcher::new(&config_for(&server)).unwrap();
        let result = fetcher.fetch(&RequestContext::new("1", "2016"));
        assert!(matches!(result, Err(crate::error::ScrapeError::Http(_))));
    }
}
