use csv::{ReaderBuilder, Writer};
use std::{
    fs::{self, File},
    io::ErrorKind,
    path::Path,
};
use tracing::{debug, info, warn};

use crate::{
    error::Result,
    types::{DatasetKind, RowRecord, StatLine},
};

/// Builds named stat lines from extracted rows, failing on the first row
/// that does not match the schema width.
pub fn build_lines(kind: DatasetKind, rows: Vec<RowRecord>) -> Result<Vec<StatLine>> {
    rows.into_iter()
        .enumerate()
        .map(|(i, cells)| StatLine::from_cells(kind, i, cells))
        .collect()
}

/// Accumulated snapshots for one season and table kind. Each entry keeps
/// the index it was persisted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    kind: DatasetKind,
    entries: Vec<(String, StatLine)>,
}

impl Dataset {
    pub fn empty(kind: DatasetKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &StatLine> {
        self.entries.iter().map(|(_, line)| line)
    }

    pub fn indices(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(index, _)| index.as_str())
    }

    /// Reads a previously saved dataset. A missing file is `Ok(None)`;
    /// every other failure propagates.
    pub fn load(kind: DatasetKind, path: &Path) -> Result<Option<Self>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);
        let mut dataset = Self::empty(kind);

        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            let mut fields = record.iter().map(str::to_string);
            let index = fields.next().unwrap_or_default();
            let line = StatLine::from_cells(kind, i, fields.collect())?;
            dataset.entries.push((index, line));
        }

        debug!("Loaded {} {} rows from {:?}", dataset.len(), kind, path);
        Ok(Some(dataset))
    }

    pub fn load_or_empty(kind: DatasetKind, path: &Path) -> Result<Self> {
        match Self::load(kind, path)? {
            Some(dataset) => Ok(dataset),
            None => {
                info!("No existing {} file at {:?}, starting a new one", kind, path);
                Ok(Self::empty(kind))
            }
        }
    }

    /// Appends one snapshot in order. New entries are indexed by their
    /// position within the snapshot.
    pub fn append(&mut self, lines: Vec<StatLine>) {
        self.entries.extend(
            lines
                .into_iter()
                .enumerate()
                .map(|(i, line)| (i.to_string(), line)),
        );
    }

    /// Rewrites the whole file through a sibling temp file. The temp file
    /// is removed if writing or renaming it fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = path.with_extension("csv.tmp");

        let written = self
            .write_csv(&tmp_path)
            .and_then(|()| fs::rename(&tmp_path, path).map_err(Into::into));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!("Failed to remove {:?}: {}", tmp_path, cleanup);
                }
            }
            return Err(e);
        }

        info!("Wrote {} {} rows to {:?}", self.len(), self.kind, path);
        Ok(())
    }

    fn write_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = Writer::from_path(path)?;

        let mut header = vec![""];
        header.extend_from_slice(self.kind.columns());
        wtr.write_record(&header)?;

        for (index, line) in &self.entries {
            let mut record = vec![index.as_str()];
            record.extend_from_slice(&line.to_record());
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
