//! Volley constants.
//!
//! This crate contains the chain presets (RPC endpoint, relay endpoint, chain
//! id) and the game economy constants shared by the planner and the bundle
//! engine.
//!

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

mod chains;
pub use chains::gnosis;
#[cfg(any(test, feature = "test-utils"))]
pub use chains::test_utils;

mod types;
pub use types::{ChainConstants, KnownChains, ParseChainError};

/// Fixed-point precision the core contract applies to resource quantities.
/// Every resource amount placed in a move call is multiplied by this value.
pub const CONTRACT_PRECISION: u64 = 1000;

/// Number of public signals produced by the move circuit.
pub const MOVE_PUBLIC_INPUTS: usize = 10;

/// Total length of the `move` call input array: the circuit's public signals,
/// the two resource quantities, and one reserved slot.
pub const MOVE_INPUT_LEN: usize = MOVE_PUBLIC_INPUTS + 3;

/// Default number of consecutive future slots a bundle is raced into.
pub const DEFAULT_SLOT_WIDTH: u64 = 20;

/// Gas price applied to bundle transactions that do not carry one, in wei
/// (2 gwei).
pub const DEFAULT_GAS_PRICE: u128 = 2_000_000_000;

/// Default interval at which the relay client polls the settlement layer for
/// a new block height, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;
