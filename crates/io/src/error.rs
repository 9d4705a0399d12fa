//! Error types for reading and writing inventory files.

/// Errors that can occur while reading or writing delimited files.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// File system error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A row that does not match the expected schema.
    #[error("schema mismatch at line {line}: {reason}")]
    SchemaMismatch {
        /// One-based line number, counting the header.
        line: u64,
        /// What is wrong with the row.
        reason: String,
    },
}
