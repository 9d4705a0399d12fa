//! Vendor lead-time files.

use std::{io::Read, path::Path};

use shelfgrid_primitives::VendorLeadTime;

use crate::IoError;

/// Read vendor lead times from CSV with a header row.
///
/// The product column may be named `sku` or `item_id`.
///
/// # Errors
/// Returns `IoError::SchemaMismatch` with the offending line for a missing
/// or mistyped field.
pub fn read_vendor_lead_times<R: Read>(reader: R) -> Result<Vec<VendorLeadTime>, IoError> {
    let mut csv_reader =
        csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);

    csv_reader
        .deserialize::<VendorLeadTime>()
        .map(|row| {
            row.map_err(|e| match e.position() {
                Some(pos) => IoError::SchemaMismatch { line: pos.line(), reason: e.to_string() },
                None => IoError::Csv(e),
            })
        })
        .collect()
}

/// Read vendor lead times from a CSV file.
///
/// # Errors
/// See [`read_vendor_lead_times`]; also fails if the file cannot be opened.
pub fn read_vendor_lead_times_file(
    path: impl AsRef<Path>,
) -> Result<Vec<VendorLeadTime>, IoError> {
    let path = path.as_ref();
    let leads = read_vendor_lead_times(std::fs::File::open(path)?)?;
    tracing::info!(path = %path.display(), rows = leads.len(), "loaded vendor lead times");
    Ok(leads)
}

#[cfg(test)]
mod tests {
    use shelfgrid_primitives::{Sku, StoreSku};

    use super::*;

    #[test]
    fn reads_item_id_column() {
        let data = "\
key,vendor_id,sub_vendor_id,store_id,item_id,lead_time_in_dc,lead_time_in_transit,lead_time_on_order
1,9,3,1,100,2,1,4
2,9,3,2,100,,1,4
";
        let leads = read_vendor_lead_times(data.as_bytes()).unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].key(), StoreSku::from((1, 100)));
        assert_eq!(leads[0].total_lead_time(), Some(7));
        assert_eq!(leads[1].sku, Sku::new(100));
        assert_eq!(leads[1].lead_time_in_dc, None);
    }

    #[test]
    fn mistyped_field_reports_line() {
        let data = "\
key,vendor_id,sub_vendor_id,store_id,sku,lead_time_in_dc,lead_time_in_transit,lead_time_on_order
1,9,3,one,100,2,1,4
";
        let err = read_vendor_lead_times(data.as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::SchemaMismatch { line: 2, .. }), "{err}");
    }
}
