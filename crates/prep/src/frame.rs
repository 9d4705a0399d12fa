//! Conversion between typed records and polars frames.

use polars::prelude::*;
use shelfgrid_primitives::{
    Date, InventoryRecord, Measure, Observation, Sku, StoreId,
    columns::{DATE, PRODUCT_CATEGORY, PROMOTION_FLAG, REPLENISHMENT_FLAG, SKU, STORE_ID},
};

use crate::{PrepError, date_range::from_epoch_days};

/// Build an observation frame in the canonical column order.
///
/// # Errors
/// Returns a polars error if the frame cannot be assembled.
pub fn observations_to_frame(observations: &[Observation]) -> PolarsResult<DataFrame> {
    let dates: Vec<Date> = observations.iter().map(|o| o.date).collect();
    let stores: Vec<i32> = observations.iter().map(|o| o.store_id.get()).collect();
    let skus: Vec<i32> = observations.iter().map(|o| o.sku.get()).collect();
    let categories: Vec<&str> =
        observations.iter().map(|o| o.product_category.as_str()).collect();

    let mut columns = vec![
        Column::new(DATE.into(), dates),
        Column::new(STORE_ID.into(), stores),
        Column::new(SKU.into(), skus),
        Column::new(PRODUCT_CATEGORY.into(), categories),
    ];
    for measure in Measure::ALL {
        let values: Vec<Option<i32>> = observations.iter().map(|o| o.measure(measure)).collect();
        columns.push(Column::new(measure.column().into(), values));
    }

    DataFrame::new(columns)
}

/// Read a prepared frame back into typed records.
///
/// # Errors
/// Returns `PrepError::SchemaMismatch` if a column is missing or mistyped,
/// and `PrepError::UnimputedField` if a flow measure, key or flag is null.
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<InventoryRecord>, PrepError> {
    let date_days = typed(column(df, DATE)?, |c| c.cast(&DataType::Int32))?;
    let dates = typed(&date_days, |c| c.i32())?;
    let stores = typed(column(df, STORE_ID)?, |c| c.i32())?;
    let skus = typed(column(df, SKU)?, |c| c.i32())?;
    let categories = typed(column(df, PRODUCT_CATEGORY)?, |c| c.str())?;
    let promotion = typed(column(df, PROMOTION_FLAG)?, |c| c.bool())?;
    let replenishment = typed(column(df, REPLENISHMENT_FLAG)?, |c| c.bool())?;

    let mut measures = Vec::with_capacity(Measure::ALL.len());
    for measure in Measure::ALL {
        measures.push(typed(column(df, measure.column())?, |c| c.i32())?);
    }
    // Measure::ALL is in declaration order, so the discriminant indexes it.
    let state = |measure: Measure, row: usize| measures[measure as usize].get(row);
    let flow = |measure: Measure, row: usize| {
        state(measure, row).ok_or_else(|| unimputed(df, measure.column()))
    };

    (0..df.height())
        .map(|row| -> Result<InventoryRecord, PrepError> {
            Ok(InventoryRecord {
                date: from_epoch_days(dates.get(row).ok_or_else(|| unimputed(df, DATE))?),
                store_id: StoreId(stores.get(row).ok_or_else(|| unimputed(df, STORE_ID))?),
                sku: Sku(skus.get(row).ok_or_else(|| unimputed(df, SKU))?),
                product_category: categories
                    .get(row)
                    .ok_or_else(|| unimputed(df, PRODUCT_CATEGORY))?
                    .to_string(),
                total_sales_units: flow(Measure::TotalSalesUnits, row)?,
                on_hand_inventory_units: state(Measure::OnHandInventoryUnits, row),
                replenishment_units: flow(Measure::ReplenishmentUnits, row)?,
                inventory_pipeline: flow(Measure::InventoryPipeline, row)?,
                units_in_transit: flow(Measure::UnitsInTransit, row)?,
                units_in_dc: flow(Measure::UnitsInDc, row)?,
                units_on_order: flow(Measure::UnitsOnOrder, row)?,
                units_under_promotion: flow(Measure::UnitsUnderPromotion, row)?,
                shelf_capacity: state(Measure::ShelfCapacity, row),
                promotion_flag: promotion.get(row).ok_or_else(|| unimputed(df, PROMOTION_FLAG))?,
                replenishment_flag: replenishment
                    .get(row)
                    .ok_or_else(|| unimputed(df, REPLENISHMENT_FLAG))?,
            })
        })
        .collect()
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, PrepError> {
    df.column(name).map_err(|_| PrepError::schema(name, "column is missing"))
}

fn typed<'a, T: 'a>(
    column: &'a Column,
    access: impl FnOnce(&'a Column) -> PolarsResult<T>,
) -> Result<T, PrepError> {
    access(column).map_err(|e| PrepError::schema(column.name(), e.to_string()))
}

fn unimputed(df: &DataFrame, name: &str) -> PrepError {
    let nulls = df.column(name).map(Column::null_count).unwrap_or_default();
    PrepError::UnimputedField { column: name.to_string(), nulls }
}
