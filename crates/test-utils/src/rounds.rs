use crate::{relay::MockConnector, test_constants::CHAIN_ID, users::TEST_SIGNERS};
use alloy::{
    network::EthereumWallet,
    primitives::{Address, Bytes},
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use volley_bundle::{BundleRound, BundleSender, RoundOptions};
use volley_types::{BundleTransaction, UnsignedTransaction};

/// Wallet holding the first test signer.
pub fn test_wallet() -> EthereumWallet {
    EthereumWallet::from(TEST_SIGNERS[0].clone())
}

/// Round options for the test chain, racing `width` slots.
pub const fn test_options(width: u64) -> RoundOptions {
    RoundOptions::new(CHAIN_ID).with_slot_width(width)
}

/// A sender signing with [`test_wallet`].
pub fn test_sender<S>(
    connector: MockConnector,
    settlement: S,
    width: u64,
) -> BundleSender<MockConnector, S> {
    BundleSender::new(connector, settlement, test_wallet(), test_options(width))
}

/// A round over [`test_sender`], plus a counter of completion callbacks.
pub fn test_round<S>(
    connector: MockConnector,
    settlement: S,
    width: u64,
) -> (BundleRound<MockConnector, S>, Arc<AtomicUsize>) {
    let completions = Arc::new(AtomicUsize::new(0));
    let counter = completions.clone();
    let round = BundleRound::new(test_sender(connector, settlement, width)).with_on_complete(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    );
    (round, completions)
}

/// A bundle entry calling `to` with one byte of calldata, with an explicit
/// gas limit so no estimate is needed.
pub fn test_tx(to: Address, byte: u8) -> BundleTransaction {
    BundleTransaction::new(UnsignedTransaction::new(to, Bytes::from(vec![byte])))
        .with_gas_limit(100_000)
}
