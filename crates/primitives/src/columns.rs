//! Column names shared by the inventory frames.

/// Calendar day of the row.
pub const DATE: &str = "date";
/// Store identifier.
pub const STORE_ID: &str = "store_id";
/// Product identifier.
pub const SKU: &str = "sku";
/// Product category label.
pub const PRODUCT_CATEGORY: &str = "product_category";
/// Derived flag: a promotion was active.
pub const PROMOTION_FLAG: &str = "promotion_flag";
/// Derived flag: units were replenished.
pub const REPLENISHMENT_FLAG: &str = "replenishment_flag";

/// Columns identifying one daily series.
pub const KEY: [&str; 2] = [STORE_ID, SKU];
