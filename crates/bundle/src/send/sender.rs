use crate::{BundleRelay, RelayConnector, RoundError, RoundOptions, Settlement, StatusFeed};
use alloy::{
    consensus::Transaction,
    eips::eip2718::Encodable2718,
    network::{Ethereum, EthereumWallet, NetworkWallet, TransactionBuilder},
    primitives::{keccak256, Address, Bytes},
    rpc::types::TransactionRequest,
};
use futures_util::{stream, StreamExt, TryStreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument};
use volley_types::{BundleTransaction, BundledTx, SignedBundle, SlotStatus, SubmissionRecord};

/// Broadcasts in flight at once.
const BROADCAST_CONCURRENCY: usize = 4;

/// Signs ordered bundles and broadcasts them across a window of slots.
///
/// `BundleSender` is generic over:
/// - `C`: A [`RelayConnector`] opening the relay session
/// - `S`: A [`Settlement`] for nonce, gas and block height reads
///
/// The sender never waits for results. That is the job of the
/// [`InclusionTracker`].
///
/// [`InclusionTracker`]: crate::InclusionTracker
#[derive(Debug, Clone)]
pub struct BundleSender<C, S> {
    connector: C,
    settlement: S,
    wallet: EthereumWallet,
    options: RoundOptions,
}

impl<C, S> BundleSender<C, S> {
    /// Create a new sender signing with the wallet's default signer.
    pub const fn new(
        connector: C,
        settlement: S,
        wallet: EthereumWallet,
        options: RoundOptions,
    ) -> Self {
        Self { connector, settlement, wallet, options }
    }

    /// Get a reference to the relay connector.
    pub const fn connector(&self) -> &C {
        &self.connector
    }

    /// Get a reference to the settlement reader.
    pub const fn settlement(&self) -> &S {
        &self.settlement
    }

    /// Get the round options.
    pub const fn options(&self) -> &RoundOptions {
        &self.options
    }

    /// Address every bundle member is signed by.
    pub fn signer_address(&self) -> Address {
        NetworkWallet::<Ethereum>::default_signer_address(&self.wallet)
    }

    /// Build the signable request for one bundle member.
    fn member_request(
        &self,
        tx: &BundleTransaction,
        signer: Address,
        nonce: u64,
        gas_limit: u64,
    ) -> TransactionRequest {
        tx.transaction
            .to_request(signer)
            .with_to(tx.recipient)
            .with_chain_id(self.options.chain_id)
            .with_nonce(nonce)
            .with_gas_limit(gas_limit)
            .with_gas_price(tx.gas_price.unwrap_or(self.options.default_gas_price))
    }
}

impl<C, S> BundleSender<C, S>
where
    C: RelayConnector + Sync,
    C::Relay: Sync,
    S: Settlement + Sync,
{
    /// Assign nonces `nonce, nonce + 1, ..` in input order and fill in
    /// missing gas limits.
    async fn prepare(
        &self,
        txs: &[BundleTransaction],
        signer: Address,
        nonce: u64,
    ) -> Result<Vec<TransactionRequest>, RoundError> {
        let mut requests = Vec::with_capacity(txs.len());
        for (offset, tx) in (0u64..).zip(txs) {
            let gas_limit = match tx.gas_limit {
                Some(gas_limit) => gas_limit,
                None => self
                    .settlement
                    .estimate_resource_cost(tx.estimate_request(signer))
                    .await
                    .map_err(RoundError::boxed(RoundError::GasEstimation))?,
            };
            requests.push(self.member_request(tx, signer, nonce + offset, gas_limit));
        }
        Ok(requests)
    }

    /// Sign `txs` as one bundle and broadcast it to the next
    /// [`RoundOptions::slot_width`] slots.
    ///
    /// Slot `i` of `feed` targets `height + i` and turns
    /// [`SlotStatus::Submitted`] as soon as its own broadcast succeeds.
    /// Returns the relay session for the tracker to reuse.
    #[instrument(skip_all, fields(txs = txs.len(), width = self.options.slot_width))]
    pub async fn send(
        &self,
        txs: &[BundleTransaction],
        feed: &StatusFeed,
    ) -> Result<C::Relay, RoundError> {
        if txs.is_empty() {
            return Err(RoundError::NoTransactions);
        }
        if self.options.slot_width == 0 {
            return Err(RoundError::EmptySlotWindow);
        }

        let relay =
            self.connector.connect().await.map_err(RoundError::boxed(RoundError::RelaySession))?;

        let signer = self.signer_address();
        let nonce = self
            .settlement
            .sequence_number(signer)
            .await
            .map_err(RoundError::boxed(RoundError::SequenceFetch))?;
        debug!(%signer, nonce, "fetched sequence number");

        let requests = self.prepare(txs, signer, nonce).await?;
        let bundle = sign_bundle(&self.wallet, requests).await?;

        let height = self
            .settlement
            .block_height()
            .await
            .map_err(RoundError::boxed(RoundError::BlockHeightFetch))?;

        broadcast(&relay, &bundle, height, self.options.slot_width, feed).await?;
        Ok(relay)
    }
}

/// Broadcast `bundle` to slots `height .. height + width`, marking each slot
/// submitted in slot order.
///
/// After the first failure no further slot is sent to. Broadcasts already
/// in flight still run to completion and are recorded, since the relay may
/// have accepted them. The first failure in slot order is returned.
async fn broadcast<R>(
    relay: &R,
    bundle: &SignedBundle,
    height: u64,
    width: u64,
    feed: &StatusFeed,
) -> Result<(), RoundError>
where
    R: BundleRelay + Sync,
{
    let failed = AtomicBool::new(false);
    let failed = &failed;

    let mut sends = std::pin::pin!(stream::iter(height..height + width)
        .map(|slot| async move {
            if failed.load(Ordering::Acquire) {
                return None;
            }
            let result = relay
                .send_bundle(bundle, slot)
                .await
                .map(|handle| SubmissionRecord::new(slot, handle))
                .map_err(|error| RoundError::Broadcast { slot, source: Box::new(error) });
            if result.is_err() {
                failed.store(true, Ordering::Release);
            }
            Some(result)
        })
        .buffered(BROADCAST_CONCURRENCY));

    let mut first_error = None;
    while let Some(outcome) = sends.next().await {
        match outcome {
            Some(Ok(record)) => {
                let index = (record.target_slot - height) as usize;
                debug!(slot = record.target_slot, "bundle submitted");
                feed.set_slot(index, SlotStatus::Submitted(record));
            }
            Some(Err(error)) => {
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
            None => {}
        }
    }

    first_error.map_or(Ok(()), Err)
}

/// Sign and encode a fully populated request.
#[instrument(skip_all)]
async fn sign_and_encode_tx(
    wallet: &EthereumWallet,
    request: TransactionRequest,
) -> Result<(Bytes, BundledTx), RoundError> {
    let signer = request
        .from
        .unwrap_or_else(|| NetworkWallet::<Ethereum>::default_signer_address(wallet));

    let envelope =
        request.build(wallet).await.map_err(RoundError::boxed(RoundError::Signing))?;

    let raw = Bytes::from(envelope.encoded_2718());
    let member = BundledTx { hash: keccak256(&raw), signer, nonce: envelope.nonce() };
    Ok((raw, member))
}

/// Sign populated requests as one ordered bundle.
///
/// Every request must carry its nonce, gas limit, gas price and chain id.
pub async fn sign_bundle(
    wallet: &EthereumWallet,
    requests: Vec<TransactionRequest>,
) -> Result<SignedBundle, RoundError> {
    let signed: Vec<(Bytes, BundledTx)> = stream::iter(requests)
        .then(|request| sign_and_encode_tx(wallet, request))
        .try_collect()
        .await?;

    let mut bundle = SignedBundle::new();
    for (raw, member) in signed {
        bundle.push(raw, member);
    }
    Ok(bundle)
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::{
        consensus::TxEnvelope,
        eips::eip2718::Decodable2718,
        primitives::U256,
        signers::local::PrivateKeySigner,
    };

    fn request(signer: Address, nonce: u64) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(signer)
            .with_to(Address::repeat_byte(0xdf))
            .with_input(vec![0xab])
            .with_chain_id(100)
            .with_nonce(nonce)
            .with_gas_limit(50_000)
            .with_gas_price(2_000_000_000)
    }

    #[tokio::test]
    async fn signs_in_order() {
        let signer = PrivateKeySigner::random();
        let address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let bundle =
            sign_bundle(&wallet, vec![request(address, 4), request(address, 5)]).await.unwrap();

        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.nonces().collect::<Vec<_>>(), vec![4, 5]);

        for (raw, member) in bundle.txs().iter().zip(bundle.members()) {
            assert_eq!(member.hash, keccak256(raw));
            assert_eq!(member.signer, address);

            let envelope = TxEnvelope::decode_2718(&mut raw.as_ref()).unwrap();
            assert!(envelope.is_legacy());
            assert_eq!(envelope.gas_price(), Some(2_000_000_000));
            assert_eq!(envelope.value(), U256::ZERO);
        }
    }

    #[tokio::test]
    async fn incomplete_request_fails_signing() {
        let signer = PrivateKeySigner::random();
        let address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let mut incomplete = request(address, 0);
        incomplete.gas = None;

        let err = sign_bundle(&wallet, vec![incomplete]).await.unwrap_err();
        assert!(matches!(err, RoundError::Signing(_)));
    }
}
