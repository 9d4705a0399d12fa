//! Validation of the observation frame.

use polars::prelude::*;
use shelfgrid_primitives::{
    Measure,
    columns::{DATE, PRODUCT_CATEGORY, SKU, STORE_ID},
};

use crate::PrepError;

/// Check an observation frame against the inventory schema and normalize it.
///
/// Required columns are `date` (a polars `Date`), `store_id` and `sku`
/// (integers), `product_category` (string) and every measure column
/// (integers, nulls allowed). Integer columns are strictly cast to `Int32`,
/// so out-of-range values fail instead of becoming null. Key columns and the
/// category may not contain nulls. Extra columns are dropped and the result
/// has the canonical column order.
///
/// # Errors
/// Returns `PrepError::SchemaMismatch` naming the first offending column.
pub fn validate_observations(df: DataFrame) -> Result<DataFrame, PrepError> {
    let mut columns = Vec::with_capacity(4 + Measure::ALL.len());
    columns.push(date_column(&df)?);
    columns.push(integer_column(&df, STORE_ID, false)?);
    columns.push(integer_column(&df, SKU, false)?);
    columns.push(category_column(&df)?);
    for measure in Measure::ALL {
        columns.push(integer_column(&df, measure.column(), true)?);
    }

    Ok(DataFrame::new(columns)?)
}

fn required<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, PrepError> {
    df.column(name).map_err(|_| PrepError::schema(name, "column is missing"))
}

fn reject_nulls(column: &Column, name: &str) -> Result<(), PrepError> {
    match column.null_count() {
        0 => Ok(()),
        nulls => Err(PrepError::schema(name, format!("{nulls} rows have no value"))),
    }
}

fn date_column(df: &DataFrame) -> Result<Column, PrepError> {
    let column = required(df, DATE)?;
    if column.dtype() != &DataType::Date {
        return Err(PrepError::schema(DATE, format!("expected date, found {}", column.dtype())));
    }
    reject_nulls(column, DATE)?;
    Ok(column.clone())
}

fn category_column(df: &DataFrame) -> Result<Column, PrepError> {
    let column = required(df, PRODUCT_CATEGORY)?;
    if column.dtype() != &DataType::String {
        return Err(PrepError::schema(
            PRODUCT_CATEGORY,
            format!("expected string, found {}", column.dtype()),
        ));
    }
    reject_nulls(column, PRODUCT_CATEGORY)?;
    Ok(column.clone())
}

fn integer_column(df: &DataFrame, name: &str, nullable: bool) -> Result<Column, PrepError> {
    let column = required(df, name)?;
    if !column.dtype().is_integer() {
        return Err(PrepError::schema(name, format!("expected integer, found {}", column.dtype())));
    }
    if !nullable {
        reject_nulls(column, name)?;
    }

    let series = column
        .as_materialized_series()
        .strict_cast(&DataType::Int32)
        .map_err(|e| PrepError::schema(name, format!("values do not fit in 32 bits: {e}")))?;
    Ok(Column::from(series))
}

#[cfg(test)]
mod tests {
    use shelfgrid_primitives::{Date, Observation, StoreSku};

    use super::*;
    use crate::observations_to_frame;

    fn frame() -> DataFrame {
        let day = Date::from_ymd_opt(2024, 1, 1).unwrap();
        let obs = vec![
            Observation::new(day, StoreSku::from((1, 100)), "snacks")
                .with(Measure::OnHandInventoryUnits, 5),
        ];
        observations_to_frame(&obs).unwrap()
    }

    #[test]
    fn accepts_canonical_frame() {
        let df = frame();
        let validated = validate_observations(df).unwrap();
        assert_eq!(validated.width(), 13);
        assert_eq!(validated.column(STORE_ID).unwrap().dtype(), &DataType::Int32);
    }

    #[test]
    fn widens_and_normalizes_integers() {
        let mut df = frame();
        let wide = df.column(SKU).unwrap().cast(&DataType::Int64).unwrap();
        df.with_column(wide).unwrap();
        df.with_column(Column::new("extra".into(), &[1.5])).unwrap();

        let validated = validate_observations(df).unwrap();
        assert_eq!(validated.column(SKU).unwrap().dtype(), &DataType::Int32);
        assert!(validated.column("extra").is_err());
    }

    #[test]
    fn rejects_missing_column() {
        let df = frame().drop(Measure::ShelfCapacity.column()).unwrap();
        let err = validate_observations(df).unwrap_err();
        assert!(matches!(err, PrepError::SchemaMismatch { ref column, .. } if column == "shelf_capacity"));
    }

    #[test]
    fn rejects_non_integer_measure() {
        let mut df = frame();
        df.with_column(Column::new("total_sales_units".into(), &[2.5])).unwrap();
        let err = validate_observations(df).unwrap_err();
        assert!(err.to_string().contains("expected integer"));
    }

    #[test]
    fn rejects_overflowing_values() {
        let mut df = frame();
        df.with_column(Column::new("units_in_dc".into(), &[i64::from(i32::MAX) + 1])).unwrap();
        let err = validate_observations(df).unwrap_err();
        assert!(matches!(err, PrepError::SchemaMismatch { ref column, .. } if column == "units_in_dc"));
    }

    #[test]
    fn rejects_null_keys() {
        let mut df = frame();
        df.with_column(Column::new(STORE_ID.into(), &[None::<i32>])).unwrap();
        let err = validate_observations(df).unwrap_err();
        assert!(err.to_string().contains("no value"));
    }
}
