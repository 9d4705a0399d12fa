//! Inventory observation files.

use std::{
    io::{Read, Write},
    path::Path,
};

use chrono::NaiveDate;
use serde::Deserialize;
use shelfgrid_primitives::{Date, InventoryRecord, Observation, Sku, StoreId};

use crate::IoError;

/// Date layout of the raw inventory extract.
const SOURCE_DATE_FORMAT: &str = "%Y%m%d";
/// Date layout written by [`write_inventory`].
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A raw CSV row before its date is parsed.
#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    store_id: i32,
    sku: i32,
    product_category: String,
    total_sales_units: Option<i32>,
    on_hand_inventory_units: Option<i32>,
    replenishment_units: Option<i32>,
    inventory_pipeline: Option<i32>,
    units_in_transit: Option<i32>,
    units_in_dc: Option<i32>,
    units_on_order: Option<i32>,
    units_under_promotion: Option<i32>,
    shelf_capacity: Option<i32>,
}

impl RawObservation {
    fn into_observation(self, line: u64) -> Result<Observation, IoError> {
        let date = parse_date(&self.date).ok_or_else(|| IoError::SchemaMismatch {
            line,
            reason: format!("invalid date {:?} (expected yyyyMMdd)", self.date),
        })?;
        if self.product_category.is_empty() {
            return Err(IoError::SchemaMismatch {
                line,
                reason: "product_category is empty".to_string(),
            });
        }

        Ok(Observation {
            date,
            store_id: StoreId(self.store_id),
            sku: Sku(self.sku),
            product_category: self.product_category,
            total_sales_units: self.total_sales_units,
            on_hand_inventory_units: self.on_hand_inventory_units,
            replenishment_units: self.replenishment_units,
            inventory_pipeline: self.inventory_pipeline,
            units_in_transit: self.units_in_transit,
            units_in_dc: self.units_in_dc,
            units_on_order: self.units_on_order,
            units_under_promotion: self.units_under_promotion,
            shelf_capacity: self.shelf_capacity,
        })
    }
}

/// Source extracts use `yyyyMMdd`; ISO dates are accepted so prepared
/// output can be read back.
fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, SOURCE_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT))
        .ok()
}

/// Read inventory observations from CSV with a header row.
///
/// Empty measure cells are read as missing. Any malformed row fails the
/// whole read rather than being skipped.
///
/// # Errors
/// Returns `IoError::SchemaMismatch` with the offending line for a missing,
/// mistyped or unparsable field, and `IoError::Csv` for malformed CSV.
pub fn read_inventory<R: Read>(reader: R) -> Result<Vec<Observation>, IoError> {
    let mut csv_reader =
        csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut observations = Vec::new();
    let mut record = csv::StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        let line = record.position().map_or(0, csv::Position::line);
        let raw: RawObservation = record
            .deserialize(Some(&headers))
            .map_err(|e| IoError::SchemaMismatch { line, reason: e.to_string() })?;
        observations.push(raw.into_observation(line)?);
    }

    tracing::debug!(rows = observations.len(), "read inventory observations");
    Ok(observations)
}

/// Read inventory observations from a CSV file.
///
/// # Errors
/// See [`read_inventory`]; also fails if the file cannot be opened.
pub fn read_inventory_file(path: impl AsRef<Path>) -> Result<Vec<Observation>, IoError> {
    let path = path.as_ref();
    let observations = read_inventory(std::fs::File::open(path)?)?;
    tracing::info!(path = %path.display(), rows = observations.len(), "loaded inventory");
    Ok(observations)
}

/// Write prepared records as CSV with a header row.
///
/// Dates are ISO formatted, unresolved state values are empty cells and
/// flags are `true`/`false`.
///
/// # Errors
/// Returns `IoError` if a record cannot be encoded or written.
pub fn write_inventory<W: Write>(writer: W, records: &[InventoryRecord]) -> Result<(), IoError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write prepared records to a CSV file, replacing it if present.
///
/// # Errors
/// See [`write_inventory`]; also fails if the file cannot be created.
pub fn write_inventory_file(
    path: impl AsRef<Path>,
    records: &[InventoryRecord],
) -> Result<(), IoError> {
    let path = path.as_ref();
    write_inventory(std::fs::File::create(path)?, records)?;
    tracing::info!(path = %path.display(), rows = records.len(), "wrote prepared inventory");
    Ok(())
}
