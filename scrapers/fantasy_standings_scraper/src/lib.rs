//! Scrapes a fantasy baseball league's standings page and appends
//! timestamped snapshots of its standings and cumulative stats tables to
//! per-season CSV files.
//!
//! Runs against the same output files must not overlap: each append reads
//! the whole file and rewrites it, so the last writer wins.

pub mod config;
pub mod dataset;
pub mod error;
pub mod fetcher;
pub mod league_standings;
pub mod standings_scraper;
pub mod types;
pub mod utils;
