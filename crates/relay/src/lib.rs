//! Flashbots-style bundle relay client.
//!
//! Bundles are sent with `eth_sendBundle`, authenticated by an
//! `X-Flashbots-Signature` header. Results are resolved by watching the
//! settlement chain: the target block's contents decide inclusion, and the
//! signer's nonce decides whether the bundle can still land.

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

/// The [`FlashbotsRelay`] client.
///
/// [`FlashbotsRelay`]: crate::client::FlashbotsRelay
pub mod client;
pub use client::{FlashbotsConnector, FlashbotsRelay};

mod error;
pub use error::{RelayError, Result};

/// JSON-RPC envelope types for the relay.
pub mod types;
