mod chains;
pub use chains::{KnownChains, ParseChainError};

use std::{borrow::Cow, str::FromStr};

/// Endpoints and identity of a settlement chain.
///
/// These are the values a round needs before it can talk to anything: which
/// chain transactions are signed for, where the settlement RPC lives, and
/// where bundles are relayed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ChainConstants {
    /// Human readable chain name.
    name: Cow<'static, str>,
    /// Chain id transactions are signed for.
    chain_id: u64,
    /// Settlement RPC endpoint.
    rpc_url: Cow<'static, str>,
    /// Bundle relay endpoint.
    relay_url: Cow<'static, str>,
}

impl ChainConstants {
    /// Create a new set of chain constants.
    pub const fn new(
        name: Cow<'static, str>,
        chain_id: u64,
        rpc_url: Cow<'static, str>,
        relay_url: Cow<'static, str>,
    ) -> Self {
        Self { name, chain_id, rpc_url, relay_url }
    }

    /// Get the hard-coded Gnosis constants.
    pub const fn gnosis() -> Self {
        crate::chains::gnosis::GNOSIS
    }

    /// Get the hard-coded local test constants.
    #[cfg(any(test, feature = "test-utils"))]
    pub const fn test() -> Self {
        crate::chains::test_utils::TEST_CHAIN
    }

    /// Get the chain name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the chain id.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get the settlement RPC URL.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Get the relay URL.
    pub fn relay_url(&self) -> &str {
        &self.relay_url
    }

    /// Override the settlement RPC URL.
    pub fn with_rpc_url(mut self, url: impl Into<Cow<'static, str>>) -> Self {
        self.rpc_url = url.into();
        self
    }

    /// Override the relay URL.
    pub fn with_relay_url(mut self, url: impl Into<Cow<'static, str>>) -> Self {
        self.relay_url = url.into();
        self
    }
}

impl From<KnownChains> for ChainConstants {
    fn from(chain: KnownChains) -> Self {
        match chain {
            KnownChains::Gnosis => Self::gnosis(),
            #[cfg(any(test, feature = "test-utils"))]
            KnownChains::Test => Self::test(),
        }
    }
}

impl FromStr for ChainConstants {
    type Err = ParseChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnownChains::from_str(s).map(Into::into)
    }
}
