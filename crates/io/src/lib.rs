#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/shelfgrid/shelfgrid/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod inventory;
pub use inventory::{read_inventory, read_inventory_file, write_inventory, write_inventory_file};

mod vendor;
pub use vendor::{read_vendor_lead_times, read_vendor_lead_times_file};

mod error;
pub use error::IoError;
