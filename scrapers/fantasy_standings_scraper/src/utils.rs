use chrono::Local;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

use crate::error::{Result, ScrapeError};

const CAPTURE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

fn team_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"teamId=(\d+)").unwrap())
}

/// Text of the page's `<title>` up to the first `-`, trimmed.
pub fn extract_title(document: &Html) -> Result<String> {
    let title_selector = Selector::parse("title").unwrap();
    let title = document
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .ok_or(ScrapeError::TitleNotFound)?;

    Ok(title_before_dash(&title))
}

pub fn title_before_dash(title: &str) -> String {
    title.split('-').next().unwrap_or_default().trim().to_string()
}

pub fn extract_team_id(href: &str) -> Option<String> {
    team_id_regex()
        .captures(href)
        .map(|cap| cap[1].to_string())
}

/// Wall-clock time of a table capture, in local time with microseconds.
pub fn capture_timestamp() -> String {
    Local::now().naive_local().format(CAPTURE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_title_before_dash() {
        assert_eq!(title_before_dash("My League - ESPN Fantasy"), "My League");
        assert_eq!(title_before_dash("  No Dash Here  "), "No Dash Here");
        assert_eq!(title_before_dash("A-B-C"), "A");
        assert_eq!(title_before_dash(""), "");
    }

    #[test]
    fn test_extract_title() {
        let document = Html::parse_document(
            "<html><head><title>Dingers Only - Standings - ESPN</title></head><body></body></html>",
        );
        assert_eq!(extract_title(&document).unwrap(), "Dingers Only");
    }

    #[test]
    fn test_extract_title_missing() {
        let document = Html::parse_fragment("<div>no title</div>");
        assert!(matches!(extract_title(&document), Err(ScrapeError::TitleNotFound)));
    }

    #[test]
    fn test_extract_team_id() {
        assert_eq!(
            extract_team_id("/flb/clubhouse?leagueId=183180&teamId=12345&seasonId=2016"),
            Some("12345".to_string())
        );
        assert_eq!(extract_team_id("/flb/clubhouse?teamId=7"), Some("7".to_string()));
        assert_eq!(extract_team_id("/flb/clubhouse?teamId=abc"), None);
        assert_eq!(extract_team_id("/flb/standings"), None);
    }

    #[test]
    fn test_capture_timestamp_format() {
        let stamp = capture_timestamp();
        assert!(NaiveDateTime::parse_from_str(&stamp, CAPTURE_FORMAT).is_ok(), "{}", stamp);
    }
}
