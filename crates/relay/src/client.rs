use crate::{
    error::Result,
    types::{JsonRpcRequest, JsonRpcResponse, SEND_BUNDLE},
    RelayError,
};
use alloy::{
    eips::BlockNumberOrTag,
    hex,
    primitives::{keccak256, Address, B256},
    providers::Provider,
    rpc::types::mev::{EthBundleHash, EthSendBundle},
    signers::{local::PrivateKeySigner, SignerSync},
};
use reqwest::header::CONTENT_TYPE;
use std::{collections::BTreeMap, time::Duration};
use tracing::{debug, instrument, warn};
use volley_types::{BundledTx, Resolution, SignedBundle};

/// Header carrying the relay authentication signature.
pub const FLASHBOTS_SIGNATURE: &str = "X-Flashbots-Signature";

/// Compute the `X-Flashbots-Signature` header value for a request body.
///
/// The relay expects `address:signature`, where the signature is an EIP-191
/// personal signature over the hex string of the body's keccak hash.
pub fn auth_header(signer: &PrivateKeySigner, body: &[u8]) -> Result<String> {
    let message = format!("{:#x}", keccak256(body));
    let signature = signer.sign_message_sync(message.as_bytes())?;
    Ok(format!("{}:{}", signer.address(), hex::encode_prefixed(signature.as_bytes())))
}

/// Decide the outcome of a bundle once its target block exists.
///
/// The bundle landed only if every member hash is in the block.
pub fn resolve_block(members: &[BundledTx], landed: &[B256]) -> Resolution {
    if !members.is_empty() && members.iter().all(|member| landed.contains(&member.hash)) {
        Resolution::Included
    } else {
        Resolution::BlockPassedWithoutInclusion
    }
}

/// Lowest bundle nonce per signer.
fn lowest_nonces(members: &[BundledTx]) -> BTreeMap<Address, u64> {
    let mut nonces = BTreeMap::new();
    for member in members {
        nonces
            .entry(member.signer)
            .and_modify(|nonce: &mut u64| *nonce = (*nonce).min(member.nonce))
            .or_insert(member.nonce);
    }
    nonces
}

/// Builds [`FlashbotsRelay`] sessions.
///
/// Holds everything a session needs. [`FlashbotsConnector::connect`] performs
/// the handshake, so a connector can be created without network access.
#[derive(Debug, Clone)]
pub struct FlashbotsConnector<P> {
    url: reqwest::Url,
    client: reqwest::Client,
    auth: PrivateKeySigner,
    provider: P,
    chain_id: u64,
    poll_interval: Duration,
}

impl<P> FlashbotsConnector<P> {
    /// Create a new connector.
    ///
    /// `auth` signs relay requests. `provider` reads the settlement chain,
    /// which must report `chain_id`.
    pub fn new(
        url: reqwest::Url,
        auth: PrivateKeySigner,
        provider: P,
        chain_id: u64,
        poll_interval: Duration,
    ) -> Self {
        Self { url, client: reqwest::Client::new(), auth, provider, chain_id, poll_interval }
    }

    /// Create a new connector given a string URL.
    pub fn new_from_string(
        url: &str,
        auth: PrivateKeySigner,
        provider: P,
        chain_id: u64,
        poll_interval: Duration,
    ) -> Result<Self> {
        let url = reqwest::Url::parse(url)?;
        Ok(Self::new(url, auth, provider, chain_id, poll_interval))
    }

    /// Use a specific [`reqwest::Client`].
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Get the relay URL.
    pub const fn url(&self) -> &reqwest::Url {
        &self.url
    }

    /// Get the expected settlement chain id.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl<P> FlashbotsConnector<P>
where
    P: Provider + Clone,
{
    /// Open a relay session.
    ///
    /// Fails if the settlement provider is unreachable or reports a chain id
    /// other than the configured one.
    #[instrument(skip_all, fields(relay = %self.url, chain_id = self.chain_id))]
    pub async fn connect(&self) -> Result<FlashbotsRelay<P>> {
        let actual = self
            .provider
            .get_chain_id()
            .await
            .inspect_err(|e| warn!(%e, "Failed to query settlement chain id"))?;

        if actual != self.chain_id {
            return Err(RelayError::ChainMismatch { expected: self.chain_id, actual });
        }

        Ok(FlashbotsRelay {
            url: self.url.clone(),
            client: self.client.clone(),
            auth: self.auth.clone(),
            provider: self.provider.clone(),
            poll_interval: self.poll_interval,
        })
    }
}

/// A connected Flashbots-style relay session.
///
/// Bundles are POSTed to the relay. Results are read from the settlement
/// chain through the provider.
#[derive(Debug, Clone)]
pub struct FlashbotsRelay<P> {
    url: reqwest::Url,
    client: reqwest::Client,
    auth: PrivateKeySigner,
    provider: P,
    poll_interval: Duration,
}

impl<P> FlashbotsRelay<P> {
    /// Get the client used to send requests.
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Get the address requests are authenticated with.
    pub fn auth_address(&self) -> Address {
        self.auth.address()
    }

    /// Get the settlement provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Get the block height polling interval.
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    async fn forward_inner<T, R>(&self, method: &str, params: T) -> Result<Option<R>>
    where
        T: serde::Serialize,
        R: serde::de::DeserializeOwned,
    {
        let body = serde_json::to_vec(&JsonRpcRequest::new(method, params))?;
        let signature = auth_header(&self.auth, &body)?;

        self.client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(FLASHBOTS_SIGNATURE, signature)
            .body(body)
            .send()
            .await
            .inspect_err(|e| warn!(%e, "Failed to reach relay"))?
            .error_for_status()?
            .json::<JsonRpcResponse<R>>()
            .await
            .inspect_err(|e| warn!(%e, "Failed to parse response from relay"))?
            .into_result()
    }
}

impl<P> FlashbotsRelay<P>
where
    P: Provider,
{
    /// Send a bundle targeting block `target`.
    ///
    /// Returns the bundle hash, if the relay reported one.
    #[instrument(skip_all, fields(slot = target, txs = bundle.len()))]
    pub async fn send_bundle(&self, bundle: &SignedBundle, target: u64) -> Result<Option<B256>> {
        let request = EthSendBundle {
            txs: bundle.txs().to_vec(),
            block_number: target,
            ..Default::default()
        };
        let response: Option<EthBundleHash> = self.forward_inner(SEND_BUNDLE, [request]).await?;
        Ok(response.map(|hash| hash.bundle_hash))
    }

    /// True if any signer's nonce moved past its lowest bundle nonce.
    async fn nonce_advanced(&self, members: &[BundledTx]) -> Result<bool> {
        for (signer, nonce) in lowest_nonces(members) {
            let current = self.provider.get_transaction_count(signer).await?;
            if current > nonce {
                debug!(%signer, current, nonce, "account nonce advanced");
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Wait until the bundle's fate at `target` is known.
    ///
    /// Polls the block height every [`Self::poll_interval`]. While the chain
    /// is below `target`, a nonce moved by another transaction resolves to
    /// [`Resolution::AccountNonceTooHigh`]. Once `target` exists, the block's
    /// contents decide the outcome.
    #[instrument(skip_all, fields(slot = target))]
    pub async fn wait_for_resolution(
        &self,
        members: &[BundledTx],
        target: u64,
    ) -> Result<Resolution> {
        loop {
            let height = self.provider.get_block_number().await?;
            if height >= target {
                break;
            }
            if self.nonce_advanced(members).await? {
                return Ok(Resolution::AccountNonceTooHigh);
            }
            tokio::time::sleep(self.poll_interval).await;
        }

        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(target))
            .await?
            .ok_or(RelayError::MissingBlock(target))?;
        let landed: Vec<B256> = block.transactions.hashes().collect();

        let resolution = resolve_block(members, &landed);
        debug!(?resolution, "target block resolved");
        Ok(resolution)
    }
}
