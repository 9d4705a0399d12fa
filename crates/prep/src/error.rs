//! Error types for inventory preparation.

use shelfgrid_primitives::Date;

/// Errors that can occur while preparing the dense inventory series.
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    /// No observations were supplied.
    #[error("empty input: no observations to derive a date range or key universe from")]
    EmptyInput,

    /// A required column is missing, mistyped or holds nulls where none are allowed.
    #[error("schema mismatch in column {column}: {reason}")]
    SchemaMismatch {
        /// Offending column.
        column: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A measure is assigned to neither or both imputation groups.
    #[error("invalid field classification: {0}")]
    InvalidFieldClassification(String),

    /// A date range whose end precedes its start.
    #[error("invalid date range: {last} is before {first}")]
    InvalidDateRange {
        /// First day.
        first: Date,
        /// Last day.
        last: Date,
    },

    /// More than one observation for the same store, SKU and day.
    #[error("duplicate observation: {count} rows for store {store_id} / sku {sku} on {date}")]
    DuplicateObservation {
        /// Day of the duplicates.
        date: Date,
        /// Store of the duplicates.
        store_id: i32,
        /// SKU of the duplicates.
        sku: i32,
        /// Number of rows sharing the key.
        count: usize,
    },

    /// A column that must be fully imputed still holds nulls.
    #[error("column {column} still has {nulls} null values")]
    UnimputedField {
        /// Offending column.
        column: String,
        /// Number of nulls.
        nulls: usize,
    },

    /// The expanded grid does not have one row per day and key.
    #[error("grid size mismatch: expected {expected} rows, got {actual}")]
    GridSizeMismatch {
        /// Days × keys.
        expected: usize,
        /// Rows produced.
        actual: usize,
    },

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl PrepError {
    pub(crate) fn schema(column: &str, reason: impl Into<String>) -> Self {
        Self::SchemaMismatch { column: column.to_string(), reason: reason.into() }
    }

    /// Returns whether the error is caused by the input data rather than by
    /// configuration or an internal fault. Such runs succeed once the source
    /// data is corrected.
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::SchemaMismatch { .. } | Self::DuplicateObservation { .. }
        )
    }
}
