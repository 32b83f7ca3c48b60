use alloy::transports::TransportError;

/// Result type for [`FlashbotsRelay`] operations.
///
/// [`FlashbotsRelay`]: crate::client::FlashbotsRelay
pub type Result<T> = std::result::Result<T, RelayError>;

/// Errors returned by the [`FlashbotsRelay`] client.
///
/// [`FlashbotsRelay`]: crate::client::FlashbotsRelay
#[derive(thiserror::Error, Debug)]
pub enum RelayError {
    /// The relay answered with a JSON-RPC error.
    #[error("relay returned error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// JSON-RPC error message.
        message: String,
    },
    /// The settlement chain is not the chain the relay was configured for.
    #[error("settlement chain id {actual} does not match expected {expected}")]
    ChainMismatch {
        /// Chain id from configuration.
        expected: u64,
        /// Chain id reported by the settlement provider.
        actual: u64,
    },
    /// The settlement node reported a height past the target block but could
    /// not return the block.
    #[error("block {0} not available from the settlement node")]
    MissingBlock(u64),

    /// An error occurred while parsing the URL.
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// An error occurred while contacting the relay.
    #[error("error contacting relay: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// An error occurred while encoding the request.
    #[error("failed to encode relay request: {0}")]
    Json(#[from] serde_json::Error),

    /// An error occurred while signing the request.
    #[error("failed to sign relay request: {0}")]
    Signer(#[from] alloy::signers::Error),

    /// An error occurred while querying the settlement node.
    #[error("settlement node error: {0}")]
    Transport(#[from] TransportError),
}
