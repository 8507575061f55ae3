use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ScrapeError};

/// One extracted table row: capture timestamp first, then the non-empty cells.
pub type RowRecord = Vec<String>;

pub const STATS_COLUMNS: [&str; 15] = [
    "DATE", "TEAM", "teamId", "R", "HR", "RBI", "SBN", "OBP", "K", "QS", "SV", "ERA", "WHIP",
    "MOVES", "CHANGE",
];

pub const STANDINGS_COLUMNS: [&str; 15] = [
    "DATE", "TEAM", "teamId", "R", "HR", "RBI", "SBN", "OBP", "K", "QS", "SV", "ERA", "WHIP",
    "POINTS", "CHANGE",
];

/// League and season a run is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    league_id: String,
    season_id: String,
}

impl RequestContext {
    pub fn new(league_id: impl Into<String>, season_id: impl Into<String>) -> Self {
        Self {
            league_id: league_id.into(),
            season_id: season_id.into(),
        }
    }

    pub fn league_id(&self) -> &str {
        &self.league_id
    }

    pub fn season_id(&self) -> &str {
        &self.season_id
    }

    pub fn payload(&self) -> LeaguePayload<'_> {
        LeaguePayload {
            league_id: &self.league_id,
            season_id: &self.season_id,
            view: "official",
        }
    }
}

/// Query parameters sent with the standings request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LeaguePayload<'a> {
    pub league_id: &'a str,
    pub season_id: &'a str,
    pub view: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetKind {
    Stats,
    Standings,
}

impl DatasetKind {
    pub fn columns(&self) -> &'static [&'static str; 15] {
        match self {
            DatasetKind::Stats => &STATS_COLUMNS,
            DatasetKind::Standings => &STANDINGS_COLUMNS,
        }
    }

    pub fn table_id(&self) -> &'static str {
        match self {
            DatasetKind::Stats => "statsTable",
            DatasetKind::Standings => "standingsTable",
        }
    }

    pub fn file_name(&self, season_id: &str) -> String {
        format!("{}_{}.csv", season_id, self)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Stats => write!(f, "stats"),
            DatasetKind::Standings => write!(f, "standings"),
        }
    }
}

/// A team's line in either table. `tally` is MOVES for stats and POINTS for standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub date: String,
    pub team: String,
    pub team_id: String,
    pub r: String,
    pub hr: String,
    pub rbi: String,
    pub sbn: String,
    pub obp: String,
    pub k: String,
    pub qs: String,
    pub sv: String,
    pub era: String,
    pub whip: String,
    pub tally: String,
    pub change: String,
}

impl StatLine {
    /// Assigns cells to columns by position. Any row that is not exactly
    /// as wide as the schema is rejected.
    pub fn from_cells(kind: DatasetKind, row: usize, cells: Vec<String>) -> Result<Self> {
        let expected = kind.columns().len();
        let cells: [String; 15] = cells.try_into().map_err(|cells: Vec<String>| {
            ScrapeError::RowLength {
                kind,
                row,
                expected,
                found: cells.len(),
                cells,
            }
        })?;
        let [
            date,
            team,
            team_id,
            r,
            hr,
            rbi,
            sbn,
            obp,
            k,
            qs,
            sv,
            era,
            whip,
            tally,
            change,
        ] = cells;

        Ok(Self {
            date,
            team,
            team_id,
            r,
            hr,
            rbi,
            sbn,
            obp,
            k,
            qs,
            sv,
            era,
            whip,
            tally,
            change,
        })
    }

    pub fn to_record(&self) -> [&str; 15] {
        [
            &self.date,
            &self.team,
            &self.team_id,
            &self.r,
            &self.hr,
            &self.rbi,
            &self.sbn,
            &self.obp,
            &self.k,
            &self.qs,
            &self.sv,
            &self.era,
            &self.whip,
            &self.tally,
            &self.change,
        ]
    }
}
