#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/shelfgrid/shelfgrid/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod fill;
pub use fill::FillPolicy;

mod event;
pub use event::EventRule;
