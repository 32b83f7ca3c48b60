//! Bindings for the core game contract.
//!
//! Only the calls volley populates are bound: `move`, `prospectPlanet`, and
//! the `worldRadius` view.

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
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod bindings;
pub use bindings::{moveCall, prospectPlanetCall, worldRadiusCall};
