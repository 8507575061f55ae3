use crate::types::DatasetKind;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Required table #{id} not found in page")]
    TableNotFound { id: &'static str },
    #[error("Page has no <title> element")]
    TitleNotFound,
    #[error("{kind} row {row} has {found} cells, expected {expected}: {cells:?}")]
    RowLength {
        kind: DatasetKind,
        row: usize,
        expected: usize,
        found: usize,
        cells: Vec<String>,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
