//! Constants for the Gnosis (xDai) chain the game settles on.

use crate::ChainConstants;
use std::borrow::Cow;

/// Name for the chain.
pub const NAME: &str = "Gnosis";
/// Chain ID for Gnosis.
pub const CHAIN_ID: u64 = 100;
/// Public RPC endpoint used by the game client.
pub const RPC_URL: &str = "https://rpc-df.xdaichain.com/";
/// Bundle relay endpoint.
pub const RELAY_URL: &str = "https://xdai-relay.nethermind.io/";

/// Chain constants for Gnosis.
pub const GNOSIS: ChainConstants = ChainConstants::new(
    Cow::Borrowed(NAME),
    CHAIN_ID,
    Cow::Borrowed(RPC_URL),
    Cow::Borrowed(RELAY_URL),
);
