//! Runtime configuration loaded from the environment.

mod error;
pub use error::ConfigError;

/// Helpers for reading trimmed values from the process environment.
pub mod env_utils;

use alloy::primitives::Address;
use std::time::Duration;
use volley_constants::{
    ChainConstants, DEFAULT_GAS_PRICE, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SLOT_WIDTH,
};

/// Chain preset name. Defaults to `gnosis`.
pub const CHAIN_ENV: &str = "VOLLEY_CHAIN";
/// Settlement RPC override.
pub const RPC_URL_ENV: &str = "VOLLEY_RPC_URL";
/// Relay URL override.
pub const RELAY_URL_ENV: &str = "VOLLEY_RELAY_URL";
/// Address of the core game contract. Required.
pub const CORE_CONTRACT_ENV: &str = "VOLLEY_CORE_CONTRACT";
/// Number of slots a bundle is raced into.
pub const SLOT_WIDTH_ENV: &str = "VOLLEY_SLOT_WIDTH";
/// Default gas price in wei.
pub const GAS_PRICE_ENV: &str = "VOLLEY_GAS_PRICE";
/// Relay poll interval in milliseconds.
pub const POLL_INTERVAL_ENV: &str = "VOLLEY_POLL_INTERVAL_MS";

/// Everything a round needs to know about its surroundings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolleyConfig {
    /// Chain identity and endpoints.
    pub chain: ChainConstants,
    /// Address of the core game contract.
    pub core_contract: Address,
    /// Number of consecutive future slots a bundle is raced into.
    pub slot_width: u64,
    /// Gas price applied to transactions that do not carry one.
    pub default_gas_price: u128,
    /// How often the relay client polls for a new block.
    pub poll_interval: Duration,
}

impl VolleyConfig {
    /// Create a configuration with default round settings.
    pub const fn new(chain: ChainConstants, core_contract: Address) -> Self {
        Self {
            chain,
            core_contract,
            slot_width: DEFAULT_SLOT_WIDTH,
            default_gas_price: DEFAULT_GAS_PRICE,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Load the configuration from the environment.
    ///
    /// Only [`CORE_CONTRACT_ENV`] is required; everything else falls back to
    /// the chain preset or the crate defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let chain = match env_utils::load_string_opt(CHAIN_ENV) {
            Some(name) => name.parse::<ChainConstants>()?,
            None => ChainConstants::gnosis(),
        };
        let chain = match env_utils::load_url_opt(RPC_URL_ENV) {
            Some(url) => chain.with_rpc_url(url),
            None => chain,
        };
        let chain = match env_utils::load_url_opt(RELAY_URL_ENV) {
            Some(url) => chain.with_relay_url(url),
            None => chain,
        };

        let mut config = Self::new(chain, env_utils::load_address(CORE_CONTRACT_ENV)?);

        if let Some(width) = env_utils::load_u64_opt(SLOT_WIDTH_ENV)? {
            config = config.with_slot_width(width);
        }
        if let Some(price) = env_utils::load_u128_opt(GAS_PRICE_ENV)? {
            config.default_gas_price = price;
        }
        if let Some(ms) = env_utils::load_u64_opt(POLL_INTERVAL_ENV)? {
            config.poll_interval = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the slot width.
    pub const fn with_slot_width(mut self, slot_width: u64) -> Self {
        self.slot_width = slot_width;
        self
    }

    /// Set the default gas price.
    pub const fn with_default_gas_price(mut self, gas_price: u128) -> Self {
        self.default_gas_price = gas_price;
        self
    }

    /// Set the relay poll interval.
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Reject settings no round can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_width == 0 {
            return Err(ConfigError::Invalid { key: SLOT_WIDTH_ENV, reason: "must be at least 1" });
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::Invalid {
                key: POLL_INTERVAL_ENV,
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }
}
