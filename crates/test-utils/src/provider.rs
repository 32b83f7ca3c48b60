use alloy::{
    primitives::{Bytes, U256},
    providers::{Provider, ProviderBuilder},
    sol_types::SolCall,
    transports::mock::Asserter,
};
use volley_bindings::worldRadiusCall;

/// A provider answering from `asserter`, without any fillers.
///
/// Every RPC call pops the next queued response, so tests queue responses in
/// the order the code under test issues calls.
pub fn mock_provider(asserter: &Asserter) -> impl Provider + Clone {
    ProviderBuilder::new().disable_recommended_fillers().connect_mocked_client(asserter.clone())
}

/// Queue a quantity response, as returned by `eth_blockNumber`,
/// `eth_getTransactionCount` and `eth_estimateGas`.
pub fn push_quantity(asserter: &Asserter, value: u64) {
    asserter.push_success(&U256::from(value));
}

/// Queue the return data of a `worldRadius()` call.
pub fn push_world_radius(asserter: &Asserter, radius: u64) {
    let encoded = Bytes::from(worldRadiusCall::abi_encode_returns(&U256::from(radius)));
    asserter.push_success(&encoded);
}
