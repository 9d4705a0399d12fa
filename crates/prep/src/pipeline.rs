//! End-to-end inventory preparation.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use shelfgrid_primitives::{InventoryRecord, MeasureKind, Observation};

use crate::{
    CategoryPolicy, EventFlagger, Imputer, ImputerConfig, PrepError, ThresholdFlag, date_range,
    expand_grid, key_universe, observations_to_frame, records_from_frame, validate_observations,
};

/// Configuration for inventory preparation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    /// How each key's category label is resolved.
    pub category_policy: CategoryPolicy,
    /// Imputation groups and defaults.
    pub imputer: ImputerConfig,
    /// Event flags derived after imputation.
    pub flags: Vec<ThresholdFlag>,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            category_policy: CategoryPolicy::default(),
            imputer: ImputerConfig::default(),
            flags: vec![ThresholdFlag::promotion(), ThresholdFlag::replenishment()],
        }
    }
}

/// Counts describing one preparation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrepSummary {
    /// Observations read.
    pub observations: usize,
    /// Distinct (store, SKU) keys.
    pub keys: usize,
    /// Days in the range.
    pub days: usize,
    /// Rows in the dense output.
    pub rows: usize,
    /// Rows created for days without an observation.
    pub gap_rows: usize,
    /// STATE values with no earlier observation to carry forward.
    pub unresolved_state: usize,
}

/// Output of a preparation run.
#[derive(Debug, Clone)]
pub struct PreparedInventory {
    /// Dense, imputed and flagged frame sorted by store, SKU and date.
    pub frame: DataFrame,
    /// Run statistics.
    pub summary: PrepSummary,
}

/// Inventory preparation pipeline.
///
/// Validates the observation frame, expands it to one row per day and
/// (store, SKU), imputes missing measures and derives event flags.
#[derive(Debug, Clone)]
pub struct InventoryPrep {
    config: PrepConfig,
    imputer: Imputer,
    flagger: EventFlagger,
}

impl InventoryPrep {
    /// Create a pipeline with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: PrepConfig::default(),
            imputer: Imputer::default(),
            flagger: EventFlagger::default(),
        }
    }

    /// Create a pipeline with custom configuration.
    ///
    /// # Errors
    /// Returns `PrepError::InvalidFieldClassification` if the imputer groups
    /// are invalid, or if a measure that must end up non-null (a flag source,
    /// or a measure `InventoryRecord` stores without `Option`) is carried
    /// forward without a `state_fallback`.
    pub fn with_config(config: PrepConfig) -> Result<Self, PrepError> {
        let imputer = Imputer::new(config.imputer.clone())?;
        if config.imputer.state_fallback.is_none() {
            Self::require_non_null_outputs(&config, &imputer)?;
        }
        let flagger = EventFlagger::with_rules(config.flags.clone());
        Ok(Self { config, imputer, flagger })
    }

    /// Carry-forward leaves nulls before a key's first value, so only
    /// measures allowed to stay null may be STATE without a fallback.
    fn require_non_null_outputs(config: &PrepConfig, imputer: &Imputer) -> Result<(), PrepError> {
        let classification = imputer.classification();
        if let Some(measure) =
            classification.state().iter().find(|m| m.default_kind() == MeasureKind::Flow)
        {
            return Err(PrepError::InvalidFieldClassification(format!(
                "{measure} is always populated in prepared records and cannot be carried forward without a state_fallback"
            )));
        }
        if let Some(flag) =
            config.flags.iter().find(|f| classification.kind_of(f.source) == MeasureKind::State)
        {
            return Err(PrepError::InvalidFieldClassification(format!(
                "{} is the source of flag {} and cannot be carried forward without a state_fallback",
                flag.source, flag.name
            )));
        }
        Ok(())
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PrepConfig {
        &self.config
    }

    /// Prepare an observation frame.
    ///
    /// # Arguments
    /// * `observations` - Frame with | date | store_id | sku | product_category | measures... |
    ///
    /// # Returns
    /// The dense frame and run statistics.
    ///
    /// # Errors
    /// Returns `PrepError` if the input is empty or malformed, holds
    /// duplicate observations, or a flag source is left unimputed.
    pub fn prepare(&self, observations: DataFrame) -> Result<PreparedInventory, PrepError> {
        let observations = validate_observations(observations)?;
        if observations.height() == 0 {
            return Err(PrepError::EmptyInput);
        }
        let observed = observations.height();
        let observations = observations.lazy();

        let range = date_range(&observations)?;
        let keys = key_universe(&observations, self.config.category_policy)?;
        tracing::info!(
            observations = observed,
            keys = keys.height(),
            first = %range.first(),
            last = %range.last(),
            "derived date range and key universe"
        );

        let grid = expand_grid(&range, &keys, observations)?;
        let imputed = self.imputer.impute(grid.lazy()).collect()?;

        let unresolved_state = self.imputer.unresolved_state(&imputed)?;
        if unresolved_state > 0 {
            tracing::warn!(
                unresolved_state,
                fallback = ?self.config.imputer.state_fallback,
                "state values precede their key's first observation"
            );
        }

        let frame = self.flagger.apply(imputed)?;
        let summary = PrepSummary {
            observations: observed,
            keys: keys.height(),
            days: range.len(),
            rows: frame.height(),
            gap_rows: frame.height() - observed,
            unresolved_state,
        };
        tracing::info!(rows = summary.rows, gap_rows = summary.gap_rows, "prepared inventory");

        Ok(PreparedInventory { frame, summary })
    }

    /// Prepare typed observations into typed records.
    ///
    /// # Errors
    /// See [`InventoryPrep::prepare`]. Also fails with
    /// `PrepError::SchemaMismatch` if the configured flags do not include the
    /// promotion and replenishment flags the record type carries.
    pub fn prepare_records(
        &self,
        observations: &[Observation],
    ) -> Result<Vec<InventoryRecord>, PrepError> {
        let prepared = self.prepare(observations_to_frame(observations)?)?;
        records_from_frame(&prepared.frame)
    }
}

impl Default for InventoryPrep {
    fn default() -> Self {
        Self::new()
    }
}
