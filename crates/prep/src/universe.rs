//! Key universe: the observed (store, SKU) pairs.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use shelfgrid_primitives::columns::{DATE, PRODUCT_CATEGORY, SKU, STORE_ID};

use crate::PrepError;

const INPUT_SEQ: &str = "__input_seq";
const CHRONO_SEQ: &str = "__chrono_seq";
const CATEGORY_COUNT: &str = "__category_count";

/// How one category label is chosen for a key whose observations disagree.
///
/// Categories are expected to be stable per key; the policy only matters
/// when they are not, and every variant is deterministic for a given input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryPolicy {
    /// Category of the chronologically last observation. Observations on
    /// the same day are ordered as they appear in the input.
    #[default]
    LastByDate,
    /// Category of the last observation in input order.
    LastInInput,
    /// Most common category. Ties go to the candidate seen latest, using
    /// the `LastByDate` ordering.
    MostFrequent,
}

impl std::str::FromStr for CategoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last_by_date" => Ok(Self::LastByDate),
            "last_in_input" => Ok(Self::LastInInput),
            "most_frequent" => Ok(Self::MostFrequent),
            other => Err(format!(
                "unknown category policy {other:?} (expected last_by_date, last_in_input or most_frequent)"
            )),
        }
    }
}

/// Extract the distinct (store, SKU) pairs and resolve one category for each.
///
/// # Arguments
/// * `observations` - Validated observation frame
/// * `policy` - Category resolution policy
///
/// # Returns
/// Frame with | store_id | sku | product_category |, one row per observed
/// key, sorted by store then SKU.
///
/// # Errors
/// Returns `PrepError::EmptyInput` if there are no observations.
pub fn key_universe(
    observations: &LazyFrame,
    policy: CategoryPolicy,
) -> Result<DataFrame, PrepError> {
    let keys = [col(STORE_ID), col(SKU)];
    let labelled = observations
        .clone()
        .select([col(DATE), col(STORE_ID), col(SKU), col(PRODUCT_CATEGORY)])
        .with_row_index(INPUT_SEQ, None);
    let chronological =
        labelled.clone().sort([DATE, INPUT_SEQ], SortMultipleOptions::new().with_maintain_order(true));

    let resolved = match policy {
        CategoryPolicy::LastByDate => {
            chronological.group_by_stable(keys).agg([col(PRODUCT_CATEGORY).last()])
        }
        CategoryPolicy::LastInInput => {
            labelled.group_by_stable(keys).agg([col(PRODUCT_CATEGORY).last()])
        }
        CategoryPolicy::MostFrequent => chronological
            .with_row_index(CHRONO_SEQ, None)
            .group_by([col(STORE_ID), col(SKU), col(PRODUCT_CATEGORY)])
            .agg([len().alias(CATEGORY_COUNT), col(CHRONO_SEQ).max()])
            .sort(
                [STORE_ID, SKU, CATEGORY_COUNT, CHRONO_SEQ],
                SortMultipleOptions::new()
                    .with_order_descending_multi([false, false, true, true])
                    .with_maintain_order(true),
            )
            .group_by_stable(keys)
            .agg([col(PRODUCT_CATEGORY).first()]),
    };

    let universe = resolved
        .select([col(STORE_ID), col(SKU), col(PRODUCT_CATEGORY)])
        .sort([STORE_ID, SKU], SortMultipleOptions::default())
        .collect()?;

    if universe.height() == 0 {
        return Err(PrepError::EmptyInput);
    }

    tracing::debug!(keys = universe.height(), ?policy, "resolved key universe");
    Ok(universe)
}
