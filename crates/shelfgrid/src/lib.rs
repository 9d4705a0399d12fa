//! # shelfgrid
//!
//! Turns sparse, event-driven inventory observations into a dense daily
//! series per store and product, ready for on-shelf availability analysis.
//!
//! This crate provides a unified interface to the shelfgrid components.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Identifier, observation and record types
//! - `traits`: Fill policy and event rule abstractions
//! - `prep`: Date range, key universe, grid expansion, imputation and flags
//! - `io`: CSV readers and writers
//! - `cli`: The `prepare` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use shelfgrid::{io, prep::InventoryPrep};
//!
//! let observations = io::read_inventory_file("inventory.csv")?;
//! let records = InventoryPrep::new().prepare_records(&observations)?;
//! io::write_inventory_file("prepared.csv", &records)?;
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use shelfgrid_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use shelfgrid_traits as traits;
#[cfg(feature = "prep")]
#[doc(inline)]
pub use shelfgrid_prep as prep;
#[cfg(feature = "io")]
#[doc(inline)]
pub use shelfgrid_io as io;
