//! Volley bundle library.
//!
//! Turns planned actions into populated contract calls, signs them as one
//! bundle and races that bundle across a window of future slots, tracking
//! which slot (if any) included it.
//!
//! The entry point is [`BundleRound`]. Everything it talks to is injected
//! through the traits in this crate: a [`RelayConnector`] for the relay, a
//! [`Settlement`] for chain reads, and a [`MoveProver`] for move proofs.

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

mod compile;
pub use compile::{ActionCompiler, CompileError, CompiledActions};

mod feed;
pub use feed::StatusFeed;

mod impls;
pub use impls::SettlementError;

mod round;
pub use round::{BundleRound, RoundOptions};

mod send;
pub use send::{sign_bundle, BundleSender, RoundError};

mod track;
pub use track::InclusionTracker;

mod traits;
pub use traits::{BundleRelay, MoveProver, RelayConnector, Settlement};
