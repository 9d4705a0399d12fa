//! Dense grid expansion.

use polars::prelude::*;
use shelfgrid_primitives::{
    Measure,
    columns::{DATE, SKU, STORE_ID},
};

use crate::{DateRange, PrepError, date_range::from_epoch_days};

const ROW_COUNT: &str = "__rows";

/// Build one row per day and key, with the observed measures attached.
///
/// The skeleton is the cross join of `range` with `keys`; observations are
/// left-joined onto it by (date, store, SKU). Days without an observation
/// keep null measures. The category always comes from `keys`, so it is
/// populated on gap days too.
///
/// # Arguments
/// * `range` - Days to cover
/// * `keys` - Key universe | store_id | sku | product_category |
/// * `observations` - Validated observation frame
///
/// # Returns
/// Frame sorted by store, SKU and date with `range.len() * keys.height()` rows.
///
/// # Errors
/// Returns `PrepError::DuplicateObservation` if two observations share a
/// day and key, since the join would emit both.
pub fn expand_grid(
    range: &DateRange,
    keys: &DataFrame,
    observations: LazyFrame,
) -> Result<DataFrame, PrepError> {
    reject_duplicates(&observations)?;

    let join_on = [col(DATE), col(STORE_ID), col(SKU)];
    let mut observed = Vec::with_capacity(3 + Measure::ALL.len());
    observed.extend(join_on.iter().cloned());
    observed.extend(Measure::ALL.iter().map(|m| col(m.column())));

    let grid = range
        .to_frame()?
        .lazy()
        .cross_join(keys.clone().lazy(), None)
        .join(
            observations.select(observed),
            join_on.clone(),
            join_on,
            JoinArgs::new(JoinType::Left),
        )
        .sort([STORE_ID, SKU, DATE], SortMultipleOptions::new().with_maintain_order(true))
        .collect()?;

    let expected = range.len() * keys.height();
    if grid.height() != expected {
        return Err(PrepError::GridSizeMismatch { expected, actual: grid.height() });
    }

    tracing::debug!(days = range.len(), keys = keys.height(), rows = grid.height(), "expanded grid");
    Ok(grid)
}

fn reject_duplicates(observations: &LazyFrame) -> Result<(), PrepError> {
    let duplicates = observations
        .clone()
        .group_by([col(DATE), col(STORE_ID), col(SKU)])
        .agg([len().cast(DataType::Int64).alias(ROW_COUNT)])
        .filter(col(ROW_COUNT).gt(lit(1)))
        .select([
            col(DATE).cast(DataType::Int32),
            col(STORE_ID),
            col(SKU),
            col(ROW_COUNT),
        ])
        .sort([DATE, STORE_ID, SKU], SortMultipleOptions::default())
        .limit(1)
        .collect()?;

    if duplicates.height() == 0 {
        return Ok(());
    }

    let date = duplicates.column(DATE)?.i32()?.get(0);
    let store_id = duplicates.column(STORE_ID)?.i32()?.get(0);
    let sku = duplicates.column(SKU)?.i32()?.get(0);
    let count = duplicates.column(ROW_COUNT)?.i64()?.get(0);

    match (date, store_id, sku, count) {
        (Some(date), Some(store_id), Some(sku), Some(count)) => {
            Err(PrepError::DuplicateObservation {
                date: from_epoch_days(date),
                store_id,
                sku,
                count: count as usize,
            })
        }
        _ => Err(PrepError::schema(DATE, "duplicate observations with null key values")),
    }
}

#[cfg(test)]
mod tests {
    use shelfgrid_primitives::{Date, Observation, StoreSku, columns::PRODUCT_CATEGORY};

    use super::*;
    use crate::{CategoryPolicy, date_range, key_universe, observations_to_frame};

    fn day(d: u32) -> Date {
        Date::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn build(obs: &[Observation]) -> Result<DataFrame, PrepError> {
        let lf = observations_to_frame(obs).unwrap().lazy();
        let range = date_range(&lf)?;
        let keys = key_universe(&lf, CategoryPolicy::default())?;
        expand_grid(&range, &keys, lf)
    }

    #[test]
    fn grid_covers_every_day_and_key() {
        let obs = vec![
            Observation::new(day(1), StoreSku::from((1, 100)), "snacks")
                .with(Measure::TotalSalesUnits, 4),
            Observation::new(day(4), StoreSku::from((2, 200)), "dairy")
                .with(Measure::TotalSalesUnits, 9),
        ];

        let grid = build(&obs).unwrap();
        assert_eq!(grid.height(), 4 * 2);

        let sales: Vec<Option<i32>> =
            grid.column("total_sales_units").unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(sales, vec![Some(4), None, None, None, None, None, None, Some(9)]);

        let categories = grid.column(PRODUCT_CATEGORY).unwrap();
        assert_eq!(categories.null_count(), 0);
    }

    #[test]
    fn observed_measures_are_unchanged() {
        let obs = vec![
            Observation::new(day(2), StoreSku::from((1, 100)), "snacks")
                .with(Measure::OnHandInventoryUnits, 17)
                .with(Measure::UnitsOnOrder, 3),
            Observation::new(day(3), StoreSku::from((1, 100)), "snacks"),
        ];

        let grid = build(&obs).unwrap();
        assert_eq!(grid.height(), 2);

        let on_hand = grid.column("on_hand_inventory_units").unwrap().i32().unwrap();
        let on_order = grid.column("units_on_order").unwrap().i32().unwrap();
        assert_eq!(on_hand.get(0), Some(17));
        assert_eq!(on_order.get(0), Some(3));
        assert_eq!(on_hand.get(1), None);
    }

    #[test]
    fn duplicate_observations_rejected() {
        let key = StoreSku::from((3, 300));
        let obs = vec![
            Observation::new(day(1), key, "snacks"),
            Observation::new(day(2), key, "snacks"),
            Observation::new(day(2), key, "snacks"),
        ];

        let err = build(&obs).unwrap_err();
        match err {
            PrepError::DuplicateObservation { date, store_id, sku, count } => {
                assert_eq!(date, day(2));
                assert_eq!((store_id, sku, count), (3, 300, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn single_day_single_key() {
        let obs = vec![Observation::new(day(9), StoreSku::from((1, 1)), "x")];
        let grid = build(&obs).unwrap();
        assert_eq!(grid.height(), 1);
    }
}
