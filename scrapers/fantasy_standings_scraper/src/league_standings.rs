use scraper::Html;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{
    dataset::{build_lines, Dataset},
    error::Result,
    fetcher::StandingsFetcher,
    standings_scraper::{extract_rows, locate_table, parse_page},
    types::{DatasetKind, RequestContext, RowRecord, StatLine},
    utils::extract_title,
};

/// Outcome of appending one snapshot to its season file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendSummary {
    pub kind: DatasetKind,
    pub path: PathBuf,
    pub appended: usize,
    pub total: usize,
}

/// A fetched and validated standings page for one league and season.
pub struct LeagueStandings {
    context: RequestContext,
    url: String,
    title: String,
    html: String,
    document: Html,
}

impl LeagueStandings {
    pub fn fetch(fetcher: &StandingsFetcher, context: RequestContext) -> Result<Self> {
        let page = fetcher.fetch(&context)?;
        Self::from_html(context, page.url, &page.body)
    }

    /// Parses a page body. Both tables and the title must be present.
    pub fn from_html(context: RequestContext, url: impl Into<String>, html: &str) -> Result<Self> {
        let document = parse_page(html);

        locate_table(&document, DatasetKind::Standings.table_id())?;
        locate_table(&document, DatasetKind::Stats.table_id())?;
        let title = extract_title(&document)?;
        info!("Parsed page '{}'", title);

        Ok(Self {
            context,
            url: url.into(),
            title,
            html: html.to_string(),
            document,
        })
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Raw page body as received.
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn rows(&self, kind: DatasetKind) -> Result<Vec<RowRecord>> {
        let table = locate_table(&self.document, kind.table_id())?;
        let rows = extract_rows(table);
        info!("Extracted {} rows from #{}", rows.len(), kind.table_id());
        Ok(rows)
    }

    pub fn lines(&self, kind: DatasetKind) -> Result<Vec<StatLine>> {
        build_lines(kind, self.rows(kind)?)
    }

    pub fn output_path(&self, kind: DatasetKind, output_dir: &Path) -> PathBuf {
        output_dir.join(kind.file_name(self.context.season_id()))
    }

    pub fn append(&self, kind: DatasetKind, output_dir: &Path) -> Result<AppendSummary> {
        let lines = self.lines(kind)?;
        self.write_lines(kind, lines, output_dir)
    }

    pub fn append_stats(&self, output_dir: &Path) -> Result<AppendSummary> {
        self.append(DatasetKind::Stats, output_dir)
    }

    pub fn append_standings(&self, output_dir: &Path) -> Result<AppendSummary> {
        self.append(DatasetKind::Standings, output_dir)
    }

    /// Appends stats then standings. Both tables are built before either
    /// file is touched, so a bad row in one leaves both files unchanged.
    pub fn append_all(&self, output_dir: &Path) -> Result<[AppendSummary; 2]> {
        let stats = self.lines(DatasetKind::Stats)?;
        let standings = self.lines(DatasetKind::Standings)?;

        Ok([
            self.write_lines(DatasetKind::Stats, stats, output_dir)?,
            self.write_lines(DatasetKind::Standings, standings, output_dir)?,
        ])
    }

    fn write_lines(
        &self,
        kind: DatasetKind,
        lines: Vec<StatLine>,
        output_dir: &Path,
    ) -> Result<AppendSummary> {
        let appended = lines.len();
        let path = self.output_path(kind, output_dir);

        let mut dataset = Dataset::load_or_empty(kind, &path)?;
        dataset.append(lines);
        dataset.save(&path)?;

        Ok(AppendSummary {
            kind,
            path,
            appended,
            total: dataset.len(),
        })
    }
}
