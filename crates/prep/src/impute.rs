//! Imputation of missing measures on the dense grid.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use shelfgrid_primitives::{
    Measure, MeasureKind,
    columns::{DATE, KEY, SKU, STORE_ID},
};
use shelfgrid_traits::FillPolicy;

use crate::PrepError;

/// Carry the last known value forward within each partition.
///
/// Leading nulls, before a partition's first value, stay null unless a
/// `fallback` is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarryForward {
    /// Value for leading nulls with no earlier observation.
    pub fallback: Option<i32>,
}

impl FillPolicy for CarryForward {
    fn fill(&self, target_col: &str, partition_cols: &[&str]) -> Expr {
        let partition: Vec<Expr> = partition_cols.iter().map(|&c| col(c)).collect();
        // Forward fill within partition
        let filled = col(target_col).forward_fill(None).over(partition);
        match self.fallback {
            Some(value) => filled.fill_null(lit(value)),
            None => filled,
        }
        .alias(target_col)
    }

    fn name(&self) -> &str {
        "carry_forward"
    }

    fn order_sensitive(&self) -> bool {
        true
    }
}

/// Replace every null with a fixed value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedDefault {
    /// Substituted value.
    pub value: i32,
}

impl FillPolicy for FixedDefault {
    fn fill(&self, target_col: &str, _partition_cols: &[&str]) -> Expr {
        col(target_col).fill_null(lit(self.value)).alias(target_col)
    }

    fn name(&self) -> &str {
        "fixed_default"
    }
}

/// Assignment of every measure to exactly one imputation group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldClassification {
    state: Vec<Measure>,
    flow: Vec<Measure>,
}

impl FieldClassification {
    /// Create a classification from explicit STATE and FLOW groups.
    ///
    /// # Errors
    /// Returns `PrepError::InvalidFieldClassification` if a measure is in
    /// neither group, in both, or listed twice.
    pub fn new(
        state: impl IntoIterator<Item = Measure>,
        flow: impl IntoIterator<Item = Measure>,
    ) -> Result<Self, PrepError> {
        let mut state: Vec<Measure> = state.into_iter().collect();
        let mut flow: Vec<Measure> = flow.into_iter().collect();
        state.sort();
        flow.sort();

        for group in [&state, &flow] {
            if let Some(pair) = group.windows(2).find(|w| w[0] == w[1]) {
                return Err(PrepError::InvalidFieldClassification(format!(
                    "{} is listed twice in the same group",
                    pair[0]
                )));
            }
        }

        for measure in Measure::ALL {
            match (state.contains(&measure), flow.contains(&measure)) {
                (true, true) => {
                    return Err(PrepError::InvalidFieldClassification(format!(
                        "{measure} is classified as both state and flow"
                    )));
                }
                (false, false) => {
                    return Err(PrepError::InvalidFieldClassification(format!(
                        "{measure} is classified as neither state nor flow"
                    )));
                }
                _ => {}
            }
        }

        Ok(Self { state, flow })
    }

    /// STATE measures, carried forward.
    #[must_use]
    pub fn state(&self) -> &[Measure] {
        &self.state
    }

    /// FLOW measures, defaulted.
    #[must_use]
    pub fn flow(&self) -> &[Measure] {
        &self.flow
    }

    /// Group of a measure.
    #[must_use]
    pub fn kind_of(&self, measure: Measure) -> MeasureKind {
        if self.state.contains(&measure) { MeasureKind::State } else { MeasureKind::Flow }
    }
}

impl Default for FieldClassification {
    fn default() -> Self {
        let (state, flow): (Vec<Measure>, Vec<Measure>) =
            Measure::ALL.into_iter().partition(|m| m.default_kind() == MeasureKind::State);
        Self { state, flow }
    }
}

/// Configuration for the imputer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImputerConfig {
    /// Measures carried forward.
    pub state: Vec<Measure>,
    /// Measures replaced by `flow_default` when missing.
    pub flow: Vec<Measure>,
    /// Value for STATE measures with no earlier observation (None keeps null).
    pub state_fallback: Option<i32>,
    /// Value for missing FLOW measures.
    pub flow_default: i32,
}

impl Default for ImputerConfig {
    fn default() -> Self {
        let classification = FieldClassification::default();
        Self {
            state: classification.state,
            flow: classification.flow,
            state_fallback: None,
            flow_default: 0,
        }
    }
}

/// Fills the nulls left by grid expansion.
///
/// STATE measures are carried forward within each (store, SKU) series in
/// date order; FLOW measures are set to a fixed default.
#[derive(Debug, Clone)]
pub struct Imputer {
    classification: FieldClassification,
    state_policy: CarryForward,
    flow_policy: FixedDefault,
}

impl Imputer {
    /// Create an imputer, validating the field classification.
    ///
    /// # Errors
    /// Returns `PrepError::InvalidFieldClassification` for an invalid grouping.
    pub fn new(config: ImputerConfig) -> Result<Self, PrepError> {
        let classification = FieldClassification::new(config.state, config.flow)?;
        Ok(Self {
            classification,
            state_policy: CarryForward { fallback: config.state_fallback },
            flow_policy: FixedDefault { value: config.flow_default },
        })
    }

    /// The validated field classification.
    #[must_use]
    pub const fn classification(&self) -> &FieldClassification {
        &self.classification
    }

    fn policy(&self, measure: Measure) -> &dyn FillPolicy {
        match self.classification.kind_of(measure) {
            MeasureKind::State => &self.state_policy,
            MeasureKind::Flow => &self.flow_policy,
        }
    }

    /// Impute every measure column of the grid.
    ///
    /// # Arguments
    /// * `grid` - Expanded grid with nullable measures
    ///
    /// # Returns
    /// LazyFrame sorted by store, SKU and date with imputed measures.
    pub fn impute(&self, grid: LazyFrame) -> LazyFrame {
        let sort_options = SortMultipleOptions::new().with_maintain_order(true);
        let sorted = grid.sort([STORE_ID, SKU, DATE], sort_options);

        let filled: Vec<Expr> = Measure::ALL
            .iter()
            .map(|&measure| self.policy(measure).fill(measure.column(), &KEY))
            .collect();

        sorted.with_columns(filled)
    }

    /// Number of STATE values left null, i.e. days before a key's first
    /// known value.
    ///
    /// # Errors
    /// Returns a polars error if a STATE column is missing.
    pub fn unresolved_state(&self, imputed: &DataFrame) -> Result<usize, PrepError> {
        let mut nulls = 0;
        for measure in self.classification.state() {
            nulls += imputed.column(measure.column())?.null_count();
        }
        Ok(nulls)
    }
}

impl Default for Imputer {
    fn default() -> Self {
        Self {
            classification: FieldClassification::default(),
            state_policy: CarryForward::default(),
            flow_policy: FixedDefault::default(),
        }
    }
}
