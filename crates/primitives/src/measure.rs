//! Inventory measure catalogue.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a measure behaves between observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureKind {
    /// A level that persists until the next observation (carried forward).
    State,
    /// An event-scoped quantity that is zero when nothing happened.
    Flow,
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State => write!(f, "state"),
            Self::Flow => write!(f, "flow"),
        }
    }
}

/// A numeric measure recorded on an inventory observation.
///
/// Serialized names match the source column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Units sold.
    TotalSalesUnits,
    /// Units on hand in the store.
    OnHandInventoryUnits,
    /// Units added to store inventory.
    ReplenishmentUnits,
    /// Units anywhere in the replenishment pipeline.
    InventoryPipeline,
    /// Units travelling from the distribution center.
    UnitsInTransit,
    /// Units held at the distribution center.
    UnitsInDc,
    /// Units ordered from the vendor.
    UnitsOnOrder,
    /// Units sold under a promotion.
    UnitsUnderPromotion,
    /// Shelf capacity in units.
    ShelfCapacity,
}

impl Measure {
    /// Every measure, in source column order.
    pub const ALL: [Self; 9] = [
        Self::TotalSalesUnits,
        Self::OnHandInventoryUnits,
        Self::ReplenishmentUnits,
        Self::InventoryPipeline,
        Self::UnitsInTransit,
        Self::UnitsInDc,
        Self::UnitsOnOrder,
        Self::UnitsUnderPromotion,
        Self::ShelfCapacity,
    ];

    /// Column name of the measure.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::TotalSalesUnits => "total_sales_units",
            Self::OnHandInventoryUnits => "on_hand_inventory_units",
            Self::ReplenishmentUnits => "replenishment_units",
            Self::InventoryPipeline => "inventory_pipeline",
            Self::UnitsInTransit => "units_in_transit",
            Self::UnitsInDc => "units_in_dc",
            Self::UnitsOnOrder => "units_on_order",
            Self::UnitsUnderPromotion => "units_under_promotion",
            Self::ShelfCapacity => "shelf_capacity",
        }
    }

    /// Look up a measure by column name.
    #[must_use]
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.column() == name)
    }

    /// The conventional grouping of this measure.
    ///
    /// On-hand inventory and shelf capacity are levels; everything else
    /// counts units moved on the day.
    #[must_use]
    pub const fn default_kind(self) -> MeasureKind {
        match self {
            Self::OnHandInventoryUnits | Self::ShelfCapacity => MeasureKind::State,
            _ => MeasureKind::Flow,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
