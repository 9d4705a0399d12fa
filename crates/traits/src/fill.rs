//! Imputation policy trait definitions.

use polars::prelude::*;

/// Imputation of null values in a measure column of the dense grid.
///
/// Implementations return an expression that evaluates to the filled column.
/// The frame the expression runs on is sorted by time within each partition,
/// so order-sensitive policies may rely on row order inside a partition.
pub trait FillPolicy: Send + Sync {
    /// Fill nulls in the target column.
    ///
    /// # Arguments
    /// * `target_col` - Column to fill
    /// * `partition_cols` - Columns identifying one time series (typically store and SKU)
    ///
    /// # Returns
    /// Polars expression producing the filled column, aliased to `target_col`.
    fn fill(&self, target_col: &str, partition_cols: &[&str]) -> Expr;

    /// Returns the name of this policy.
    fn name(&self) -> &str;

    /// Whether the policy depends on row order within a partition.
    fn order_sensitive(&self) -> bool {
        false
    }
}
