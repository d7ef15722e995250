use std::path::PathBuf;

/// Post-load checks that failed after the transaction committed.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("row count mismatch: expected {expected} rows, found {actual}")]
    RowCount { expected: u64, actual: u64 },

    #[error(
        "id set mismatch: {} source ids not persisted, {} persisted ids not in source",
        missing.len(),
        unexpected.len()
    )]
    IdSet { missing: Vec<i64>, unexpected: Vec<i64> },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv")]
    Csv(#[from] csv::Error),

    #[error("source is missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("line {line}: expected at most {expected} fields, found {found}")]
    RaggedRow { line: u64, expected: usize, found: usize },

    #[error("line {line}: invalid value for `{column}`: {message}")]
    InvalidField {
        line: u64,
        column: &'static str,
        message: String,
    },

    #[error("database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("verification failed")]
    Verification(#[from] VerificationError),
}

pub type LoadResult<T> = Result<T, LoadError>;
