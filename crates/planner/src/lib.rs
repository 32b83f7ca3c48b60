//! Volley capture planner.
//!
//! Scores candidate targets around a source entity, then greedily spends a
//! resource budget on the closest ones that still need capturing.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod allocator;
pub use allocator::{allocate, capture_budget, required_arrival, BudgetLedger};

mod error;
pub use error::PlanError;

mod filter;
pub use filter::{filter_candidates, find_candidates};

mod planner;
pub use planner::Planner;

mod traits;
pub use traits::WorldOracle;
