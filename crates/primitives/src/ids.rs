//! Store and product identifiers.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Identifier of a store (the location half of a key).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct StoreId(pub i32);

impl StoreId {
    /// Create a new store ID.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Stock keeping unit identifier (the product half of a key).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Sku(pub i32);

impl Sku {
    /// Create a new SKU.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// A (store, SKU) pair: the identity around which one daily series is built.
///
/// Ordering is by store first, then SKU, matching the row order of the
/// prepared output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display("store {store_id} / sku {sku}")]
pub struct StoreSku {
    /// Store half of the key.
    pub store_id: StoreId,
    /// Product half of the key.
    pub sku: Sku,
}

impl StoreSku {
    /// Create a new key.
    #[must_use]
    pub const fn new(store_id: StoreId, sku: Sku) -> Self {
        Self { store_id, sku }
    }
}

impl From<(i32, i32)> for StoreSku {
    fn from((store_id, sku): (i32, i32)) -> Self {
        Self::new(StoreId(store_id), Sku(sku))
    }
}
