#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/shelfgrid/shelfgrid/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod ids;
pub use ids::{Sku, StoreId, StoreSku};

mod measure;
pub use measure::{Measure, MeasureKind};

mod observation;
pub use observation::Observation;

mod record;
pub use record::InventoryRecord;

mod vendor;
pub use vendor::VendorLeadTime;

pub mod columns;

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
