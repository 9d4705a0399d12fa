//! Inventory event flags.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use shelfgrid_primitives::{
    Measure,
    columns::{PROMOTION_FLAG, REPLENISHMENT_FLAG},
};
use shelfgrid_traits::EventRule;

use crate::PrepError;

/// Flag raised when a measure exceeds a threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdFlag {
    /// Output column name.
    pub name: String,
    /// Measure compared.
    pub source: Measure,
    /// The flag is true when `source > threshold`.
    pub threshold: i32,
}

impl ThresholdFlag {
    /// Create a new threshold flag.
    #[must_use]
    pub fn new(name: impl Into<String>, source: Measure, threshold: i32) -> Self {
        Self { name: name.into(), source, threshold }
    }

    /// Promotion active: units under promotion above zero.
    #[must_use]
    pub fn promotion() -> Self {
        Self::new(PROMOTION_FLAG, Measure::UnitsUnderPromotion, 0)
    }

    /// Replenishment occurred: replenished units above zero.
    #[must_use]
    pub fn replenishment() -> Self {
        Self::new(REPLENISHMENT_FLAG, Measure::ReplenishmentUnits, 0)
    }
}

impl EventRule for ThresholdFlag {
    fn name(&self) -> &str {
        &self.name
    }

    fn sources(&self) -> Vec<&str> {
        vec![self.source.column()]
    }

    fn flag(&self) -> Expr {
        col(self.source.column()).gt(lit(self.threshold)).alias(self.name.as_str())
    }
}

/// Derives event flags from imputed measures.
#[derive(Debug, Clone)]
pub struct EventFlagger {
    rules: Vec<ThresholdFlag>,
}

impl EventFlagger {
    /// Create a flagger with the given rules.
    #[must_use]
    pub const fn with_rules(rules: Vec<ThresholdFlag>) -> Self {
        Self { rules }
    }

    /// Rules applied.
    #[must_use]
    pub fn rules(&self) -> &[ThresholdFlag] {
        &self.rules
    }

    /// Append one boolean column per rule.
    ///
    /// # Errors
    /// Returns `PrepError::UnimputedField` if a source column still holds
    /// nulls; flags are only defined on imputed data.
    pub fn apply(&self, imputed: DataFrame) -> Result<DataFrame, PrepError> {
        for rule in &self.rules {
            for source in rule.sources() {
                let nulls = imputed.column(source)?.null_count();
                if nulls > 0 {
                    return Err(PrepError::UnimputedField { column: source.to_string(), nulls });
                }
            }
        }

        let flags: Vec<Expr> = self.rules.iter().map(EventRule::flag).collect();
        Ok(imputed.lazy().with_columns(flags).collect()?)
    }
}

impl Default for EventFlagger {
    fn default() -> Self {
        Self::with_rules(vec![ThresholdFlag::promotion(), ThresholdFlag::replenishment()])
    }
}
