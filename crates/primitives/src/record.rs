//! Dense, imputed inventory records.

use serde::{Deserialize, Serialize};

use crate::{Date, Measure, Observation, Sku, StoreId, StoreSku};

/// One row of the prepared daily series.
///
/// Flow measures are always populated. State measures are `None` only when
/// no earlier observation of the key ever supplied a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Calendar day.
    pub date: Date,
    /// Store.
    pub store_id: StoreId,
    /// Product.
    pub sku: Sku,
    /// Category label resolved for the key.
    pub product_category: String,
    /// Units sold.
    pub total_sales_units: i32,
    /// Units on hand (carried forward).
    pub on_hand_inventory_units: Option<i32>,
    /// Units added to store inventory.
    pub replenishment_units: i32,
    /// Units in the replenishment pipeline.
    pub inventory_pipeline: i32,
    /// Units in transit.
    pub units_in_transit: i32,
    /// Units at the distribution center.
    pub units_in_dc: i32,
    /// Units on order.
    pub units_on_order: i32,
    /// Units under promotion.
    pub units_under_promotion: i32,
    /// Shelf capacity (carried forward).
    pub shelf_capacity: Option<i32>,
    /// A promotion was active on the day.
    pub promotion_flag: bool,
    /// Units were replenished on the day.
    pub replenishment_flag: bool,
}

impl InventoryRecord {
    /// The (store, SKU) key of the record.
    #[must_use]
    pub const fn key(&self) -> StoreSku {
        StoreSku::new(self.store_id, self.sku)
    }

    /// Value of a measure.
    #[must_use]
    pub const fn measure(&self, measure: Measure) -> Option<i32> {
        match measure {
            Measure::TotalSalesUnits => Some(self.total_sales_units),
            Measure::OnHandInventoryUnits => self.on_hand_inventory_units,
            Measure::ReplenishmentUnits => Some(self.replenishment_units),
            Measure::InventoryPipeline => Some(self.inventory_pipeline),
            Measure::UnitsInTransit => Some(self.units_in_transit),
            Measure::UnitsInDc => Some(self.units_in_dc),
            Measure::UnitsOnOrder => Some(self.units_on_order),
            Measure::UnitsUnderPromotion => Some(self.units_under_promotion),
            Measure::ShelfCapacity => self.shelf_capacity,
        }
    }

    /// Project the record back into observation shape, dropping the flags.
    #[must_use]
    pub fn to_observation(&self) -> Observation {
        let mut obs = Observation::new(self.date, self.key(), self.product_category.clone());
        for measure in Measure::ALL {
            *obs.slot(measure) = self.measure(measure);
        }
        obs
    }
}
