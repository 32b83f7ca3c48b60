use alloy::{primitives::Address, rpc::types::TransactionRequest};
use core::future::Future;
use volley_types::{
    BundleHandle, MoveProof, MoveProofRequest, Resolution, SignedBundle, SubmissionRecord,
};

/// Read access to the settlement chain.
///
/// Implemented for every alloy [`Provider`], so a plain RPC provider can be
/// handed to the [`BundleSender`] and the [`ActionCompiler`] directly.
///
/// [`Provider`]: alloy::providers::Provider
/// [`BundleSender`]: crate::BundleSender
/// [`ActionCompiler`]: crate::ActionCompiler
pub trait Settlement {
    /// The error type returned by settlement reads.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Next sequence number (nonce) of `account`.
    fn sequence_number(
        &self,
        account: Address,
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Current block height.
    fn block_height(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Estimate the gas a transaction would consume.
    fn estimate_resource_cost(
        &self,
        request: TransactionRequest,
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// The world radius declared by the core contract at `core`.
    fn world_radius(&self, core: Address) -> impl Future<Output = Result<u64, Self::Error>> + Send;
}

/// Produces zero-knowledge proofs for moves.
///
/// Proof generation is expensive. Implementors are free to run it on a
/// blocking pool or a remote service.
pub trait MoveProver {
    /// The error type returned when no proof can be produced.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Prove a move between the request's endpoints.
    fn prove_move(
        &self,
        request: MoveProofRequest,
    ) -> impl Future<Output = Result<MoveProof, Self::Error>> + Send;
}

/// Opens sessions with a bundle relay.
pub trait RelayConnector {
    /// The session type.
    type Relay: BundleRelay;
    /// The error type returned when the handshake fails.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Perform the relay handshake.
    fn connect(&self) -> impl Future<Output = Result<Self::Relay, Self::Error>> + Send;
}

/// A connected relay session.
///
/// Implementors broadcast signed bundles to a target slot and report what
/// became of each broadcast.
pub trait BundleRelay {
    /// The error type returned by relay operations.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Broadcast `bundle` for inclusion at block height `slot`.
    fn send_bundle(
        &self,
        bundle: &SignedBundle,
        slot: u64,
    ) -> impl Future<Output = Result<BundleHandle, Self::Error>> + Send;

    /// Wait until the outcome of a broadcast is known.
    fn await_result(
        &self,
        record: &SubmissionRecord,
    ) -> impl Future<Output = Result<Resolution, Self::Error>> + Send;
}
