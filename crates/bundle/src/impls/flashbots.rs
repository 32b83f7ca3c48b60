use crate::{BundleRelay, RelayConnector};
use alloy::providers::Provider;
use volley_relay::{FlashbotsConnector, FlashbotsRelay, RelayError};
use volley_types::{BundleHandle, Resolution, SignedBundle, SubmissionRecord};

impl<P> RelayConnector for FlashbotsConnector<P>
where
    P: Provider + Clone,
{
    type Relay = FlashbotsRelay<P>;
    type Error = RelayError;

    async fn connect(&self) -> Result<Self::Relay, Self::Error> {
        FlashbotsConnector::connect(self).await
    }
}

impl<P> BundleRelay for FlashbotsRelay<P>
where
    P: Provider,
{
    type Error = RelayError;

    async fn send_bundle(
        &self,
        bundle: &SignedBundle,
        slot: u64,
    ) -> Result<BundleHandle, Self::Error> {
        let bundle_hash = FlashbotsRelay::send_bundle(self, bundle, slot).await?;
        Ok(BundleHandle { bundle_hash, members: bundle.members().to_vec() })
    }

    async fn await_result(&self, record: &SubmissionRecord) -> Result<Resolution, Self::Error> {
        self.wait_for_resolution(&record.handle.members, record.target_slot).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::{
        primitives::{Address, B256, U256},
        providers::ProviderBuilder,
        signers::local::PrivateKeySigner,
        transports::mock::Asserter,
    };
    use std::time::Duration;
    use volley_types::BundledTx;

    fn connector(asserter: &Asserter) -> FlashbotsConnector<impl Provider + Clone> {
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        FlashbotsConnector::new_from_string(
            "http://localhost:8546/",
            PrivateKeySigner::random(),
            provider,
            100,
            Duration::from_millis(1),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn handshake_checks_chain() {
        let asserter = Asserter::new();
        asserter.push_success(&U256::from(31337));

        let Err(err) = RelayConnector::connect(&connector(&asserter)).await else {
            panic!("handshake accepted the wrong chain");
        };
        assert!(matches!(err, RelayError::ChainMismatch { expected: 100, actual: 31337 }));
    }

    #[tokio::test]
    async fn await_result_reads_nonces() {
        let asserter = Asserter::new();
        asserter.push_success(&U256::from(100));
        let relay = RelayConnector::connect(&connector(&asserter)).await.unwrap();

        let member = BundledTx { hash: B256::repeat_byte(1), signer: Address::ZERO, nonce: 3 };
        let record = SubmissionRecord::new(
            50,
            BundleHandle { bundle_hash: None, members: vec![member] },
        );

        // height 49, nonce still 3, then height 49 again and nonce 4
        asserter.push_success(&U256::from(49));
        asserter.push_success(&U256::from(3));
        asserter.push_success(&U256::from(49));
        asserter.push_success(&U256::from(4));

        let resolution = relay.await_result(&record).await.unwrap();
        assert_eq!(resolution, Resolution::AccountNonceTooHigh);
    }
}
