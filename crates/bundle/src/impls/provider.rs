use crate::Settlement;
use alloy::{
    network::TransactionBuilder,
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
    sol_types::SolCall,
    transports::TransportError,
};
use volley_bindings::worldRadiusCall;

/// Errors returned by the [`Settlement`] implementation for alloy providers.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SettlementError {
    /// RPC call failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] TransportError),
    /// A contract call returned data that does not decode.
    #[error("failed to decode call result: {0}")]
    Decode(#[from] alloy::sol_types::Error),
    /// A contract value does not fit the expected integer width.
    #[error("value {0} out of range")]
    Overflow(U256),
}

impl<P> Settlement for P
where
    P: Provider,
{
    type Error = SettlementError;

    async fn sequence_number(&self, account: Address) -> Result<u64, Self::Error> {
        self.get_transaction_count(account).await.map_err(Into::into)
    }

    async fn block_height(&self) -> Result<u64, Self::Error> {
        self.get_block_number().await.map_err(Into::into)
    }

    async fn estimate_resource_cost(&self, request: TransactionRequest) -> Result<u64, Self::Error> {
        self.estimate_gas(request).await.map_err(Into::into)
    }

    async fn world_radius(&self, core: Address) -> Result<u64, Self::Error> {
        let request = TransactionRequest::default()
            .with_to(core)
            .with_input(worldRadiusCall {}.abi_encode());
        let output = self.call(request).await?;
        let radius = worldRadiusCall::abi_decode_returns(&output)?;
        u64::try_from(radius).map_err(|_| SettlementError::Overflow(radius))
    }
}
