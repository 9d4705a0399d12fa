//! Raw inventory observations.

use serde::{Deserialize, Serialize};

use crate::{Date, Measure, Sku, StoreId, StoreSku};

/// One recorded inventory transaction for a store, product and day.
///
/// Observations only exist on days when something affected inventory, and
/// any measure may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Day of the transaction.
    pub date: Date,
    /// Store the transaction happened at.
    pub store_id: StoreId,
    /// Product the transaction concerns.
    pub sku: Sku,
    /// Category label of the product.
    pub product_category: String,
    /// Units sold.
    pub total_sales_units: Option<i32>,
    /// Units on hand.
    pub on_hand_inventory_units: Option<i32>,
    /// Units added to store inventory.
    pub replenishment_units: Option<i32>,
    /// Units in the replenishment pipeline.
    pub inventory_pipeline: Option<i32>,
    /// Units in transit.
    pub units_in_transit: Option<i32>,
    /// Units at the distribution center.
    pub units_in_dc: Option<i32>,
    /// Units on order.
    pub units_on_order: Option<i32>,
    /// Units under promotion.
    pub units_under_promotion: Option<i32>,
    /// Shelf capacity.
    pub shelf_capacity: Option<i32>,
}

impl Observation {
    /// Create an observation with every measure missing.
    #[must_use]
    pub fn new(date: Date, key: StoreSku, product_category: impl Into<String>) -> Self {
        Self {
            date,
            store_id: key.store_id,
            sku: key.sku,
            product_category: product_category.into(),
            total_sales_units: None,
            on_hand_inventory_units: None,
            replenishment_units: None,
            inventory_pipeline: None,
            units_in_transit: None,
            units_in_dc: None,
            units_on_order: None,
            units_under_promotion: None,
            shelf_capacity: None,
        }
    }

    /// Set a measure, builder style.
    #[must_use]
    pub fn with(mut self, measure: Measure, value: i32) -> Self {
        *self.slot(measure) = Some(value);
        self
    }

    /// The (store, SKU) key of the observation.
    #[must_use]
    pub const fn key(&self) -> StoreSku {
        StoreSku::new(self.store_id, self.sku)
    }

    /// Value of a measure, if recorded.
    #[must_use]
    pub const fn measure(&self, measure: Measure) -> Option<i32> {
        match measure {
            Measure::TotalSalesUnits => self.total_sales_units,
            Measure::OnHandInventoryUnits => self.on_hand_inventory_units,
            Measure::ReplenishmentUnits => self.replenishment_units,
            Measure::InventoryPipeline => self.inventory_pipeline,
            Measure::UnitsInTransit => self.units_in_transit,
            Measure::UnitsInDc => self.units_in_dc,
            Measure::UnitsOnOrder => self.units_on_order,
            Measure::UnitsUnderPromotion => self.units_under_promotion,
            Measure::ShelfCapacity => self.shelf_capacity,
        }
    }

    /// Mutable slot of a measure.
    pub const fn slot(&mut self, measure: Measure) -> &mut Option<i32> {
        match measure {
            Measure::TotalSalesUnits => &mut self.total_sales_units,
            Measure::OnHandInventoryUnits => &mut self.on_hand_inventory_units,
            Measure::ReplenishmentUnits => &mut self.replenishment_units,
            Measure::InventoryPipeline => &mut self.inventory_pipeline,
            Measure::UnitsInTransit => &mut self.units_in_transit,
            Measure::UnitsInDc => &mut self.units_in_dc,
            Measure::UnitsOnOrder => &mut self.units_on_order,
            Measure::UnitsUnderPromotion => &mut self.units_under_promotion,
            Measure::ShelfCapacity => &mut self.shelf_capacity,
        }
    }
}
