type BoxError = Box<dyn core::error::Error + Send + Sync>;

/// Errors that end a [`BundleRound`].
///
/// The display strings are meant for end users and are what the round
/// records as its error.
///
/// [`BundleRound`]: crate::BundleRound
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RoundError {
    /// `submit` was called with nothing to submit.
    #[error("No transactions to submit")]
    NoTransactions,
    /// The round was configured to broadcast into zero slots.
    #[error("Slot width must be at least 1")]
    EmptySlotWindow,
    /// The relay handshake failed.
    #[error("Could not create Flashbots bundle provider")]
    RelaySession(#[source] BoxError),
    /// The signer's nonce could not be read.
    #[error("Could not retrieve nonce")]
    SequenceFetch(#[source] BoxError),
    /// Gas estimation failed for a bundle member.
    #[error("Could not estimate gas limit")]
    GasEstimation(#[source] BoxError),
    /// The bundle could not be signed.
    #[error("Could not sign bundle")]
    Signing(#[source] BoxError),
    /// The current block height could not be read.
    #[error("Could not get current block")]
    BlockHeightFetch(#[source] BoxError),
    /// The relay rejected a broadcast.
    #[error("Could not send bundle")]
    Broadcast {
        /// Slot the failed broadcast targeted.
        slot: u64,
        /// Relay error.
        #[source]
        source: BoxError,
    },
    /// The relay failed while waiting for a result.
    #[error("Could not await bundle result")]
    ResultAwait {
        /// Slot being awaited.
        slot: u64,
        /// Relay error.
        #[source]
        source: BoxError,
    },
}

impl RoundError {
    /// Box an error into `variant`.
    pub(crate) fn boxed<E>(variant: fn(BoxError) -> Self) -> impl FnOnce(E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        move |error| variant(Box::new(error))
    }
}
