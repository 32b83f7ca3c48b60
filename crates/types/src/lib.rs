//! Types shared by the volley planner and bundle engine.
//!
//! The types here describe one round end to end: the entity snapshots the
//! game oracle hands out, the actions the planner commits to, the unsigned
//! and signed transactions built from them, and the per-slot status of a
//! bundle raced across future blocks.

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

pub mod config;
pub use config::{ConfigError, VolleyConfig};

mod entity;
pub use entity::{Coords, Entity, EntityId, EntityKind, PendingAction};

mod plan;
pub use plan::{Candidate, FilterParams, MoveEndpoints, PlannedAction};

mod proof;
pub use proof::{MoveProof, MoveProofRequest};

mod tx;
pub use tx::{BundleTransaction, BundledTx, SignedBundle, UnsignedTransaction};

mod slot;
pub use slot::{BundleHandle, Resolution, RoundState, SlotState, SlotStatus, SubmissionRecord};
