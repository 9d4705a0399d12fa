//! Vendor lead-time records.

use serde::{Deserialize, Serialize};

use crate::{Sku, StoreId, StoreSku};

/// Replenishment lead times for a vendor supplying a store and product.
///
/// Read alongside the inventory data for downstream availability analysis;
/// the source file calls the product column `item_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorLeadTime {
    /// Source row key.
    pub key: i32,
    /// Vendor identifier.
    pub vendor_id: i32,
    /// Sub-vendor identifier.
    pub sub_vendor_id: i32,
    /// Store supplied.
    pub store_id: StoreId,
    /// Product supplied.
    #[serde(alias = "item_id")]
    pub sku: Sku,
    /// Days spent at the distribution center.
    pub lead_time_in_dc: Option<i32>,
    /// Days in transit to the store.
    pub lead_time_in_transit: Option<i32>,
    /// Days between order and vendor shipment.
    pub lead_time_on_order: Option<i32>,
}

impl VendorLeadTime {
    /// The (store, SKU) key the lead time applies to.
    #[must_use]
    pub const fn key(&self) -> StoreSku {
        StoreSku::new(self.store_id, self.sku)
    }

    /// Total lead time across all stages, if every stage is known and the
    /// sum fits in an `i32`.
    #[must_use]
    pub fn total_lead_time(&self) -> Option<i32> {
        self.lead_time_in_dc?
            .checked_add(self.lead_time_in_transit?)?
            .checked_add(self.lead_time_on_order?)
    }
}
