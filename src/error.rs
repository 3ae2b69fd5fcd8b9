use thiserror::Error;

/// An internal invariant of a batch broke. Always a logic defect, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("worst case = {worst} < best case = {best}")]
    InvertedBounds { worst: u32, best: u32 },

    #[error("iter {iter}: value = {value} > worst case: {worst}")]
    AboveWorstCase { iter: usize, value: u32, worst: u32 },

    #[error("iter {iter}: value = {value} < best case: {best}")]
    BelowBestCase { iter: usize, value: u32, best: u32 },
}

/// Recorded-run CSV could not be used.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to read recorded run: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected number of lines, found {0}")]
    LineCount(usize),

    #[error("unexpected number of columns on line #{line}, found {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("line #{0} is malformed")]
    Malformed(usize),

    #[error("expected one value per stage, got {0}")]
    StageCount(usize),
}

/// A chart-data artifact could not be produced. Reported, never fatal.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "cli")]
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("panic: {0}")]
    Panicked(String),
}

pub type Result<T> = std::result::Result<T, ConsistencyError>;
