//! Constants for local test chains.

use crate::ChainConstants;
use alloy::primitives::Address;
use std::borrow::Cow;

/// Name for the test chain.
pub const NAME: &str = "Test";
/// Test chain id.
pub const CHAIN_ID: u64 = 31337;
/// Test RPC endpoint.
pub const RPC_URL: &str = "http://localhost:8545/";
/// Test relay endpoint.
pub const RELAY_URL: &str = "http://localhost:8546/";
/// Test address for the core game contract.
pub const CORE_CONTRACT: Address = Address::repeat_byte(0xdf);

/// Chain constants for tests.
pub const TEST_CHAIN: ChainConstants = ChainConstants::new(
    Cow::Borrowed(NAME),
    CHAIN_ID,
    Cow::Borrowed(RPC_URL),
    Cow::Borrowed(RELAY_URL),
);
