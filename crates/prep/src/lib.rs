#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/shelfgrid/shelfgrid/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod schema;
pub use schema::validate_observations;

mod date_range;
pub use date_range::{DateRange, date_range};

mod universe;
pub use universe::{CategoryPolicy, key_universe};

mod grid;
pub use grid::expand_grid;

mod impute;
pub use impute::{CarryForward, FieldClassification, FixedDefault, Imputer, ImputerConfig};

mod flags;
pub use flags::{EventFlagger, ThresholdFlag};

mod frame;
pub use frame::{observations_to_frame, records_from_frame};

mod pipeline;
pub use pipeline::{InventoryPrep, PrepConfig, PrepSummary, PreparedInventory};

mod error;
pub use error::PrepError;

/// Re-export commonly used types.
pub mod prelude {
    pub use shelfgrid_traits::{EventRule, FillPolicy};

    pub use super::{CategoryPolicy, InventoryPrep, PrepConfig, PrepError, PreparedInventory};
}
