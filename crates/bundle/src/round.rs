use crate::{BundleSender, InclusionTracker, RelayConnector, RoundError, Settlement, StatusFeed};
use core::fmt;
use tokio::sync::watch;
use tracing::{instrument, warn};
use volley_constants::{DEFAULT_GAS_PRICE, DEFAULT_SLOT_WIDTH};
use volley_types::{BundleTransaction, RoundState, VolleyConfig};

/// Per-round settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOptions {
    /// Chain id every bundle member is signed for.
    pub chain_id: u64,
    /// Number of consecutive slots a bundle is raced into.
    pub slot_width: u64,
    /// Gas price for members that do not carry one.
    pub default_gas_price: u128,
}

impl RoundOptions {
    /// Options for `chain_id` with the default width and gas price.
    pub const fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            slot_width: DEFAULT_SLOT_WIDTH,
            default_gas_price: DEFAULT_GAS_PRICE,
        }
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
}

impl From<&VolleyConfig> for RoundOptions {
    fn from(config: &VolleyConfig) -> Self {
        Self {
            chain_id: config.chain.chain_id(),
            slot_width: config.slot_width,
            default_gas_price: config.default_gas_price,
        }
    }
}

type Callback = Box<dyn Fn() + Send + Sync>;

/// Caller-facing handle for bundle rounds.
///
/// A round signs the given transactions as one bundle, broadcasts it to the
/// configured number of slots and tracks which slot, if any, included it.
/// Progress is observable through [`BundleRound::subscribe`].
///
/// [`BundleRound::submit`] takes `&mut self`, so one handle runs at most one
/// round at a time. The completion callback fires once per finished round,
/// whatever the outcome. A round whose future is dropped does not fire it.
pub struct BundleRound<C, S> {
    sender: BundleSender<C, S>,
    feed: StatusFeed,
    on_complete: Option<Callback>,
}

impl<C, S> fmt::Debug for BundleRound<C, S>
where
    C: fmt::Debug,
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundleRound")
            .field("sender", &self.sender)
            .field("feed", &self.feed)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl<C, S> BundleRound<C, S> {
    /// Create a new round handle around `sender`.
    pub fn new(sender: BundleSender<C, S>) -> Self {
        Self { sender, feed: StatusFeed::new(), on_complete: None }
    }

    /// Set the callback fired when a round finishes.
    pub fn with_on_complete(mut self, on_complete: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    /// Get a reference to the sender.
    pub const fn sender(&self) -> &BundleSender<C, S> {
        &self.sender
    }

    /// Subscribe to round state changes. Drop the receiver to unsubscribe.
    pub fn subscribe(&self) -> watch::Receiver<RoundState> {
        self.feed.subscribe()
    }

    /// The current round state.
    pub fn state(&self) -> RoundState {
        self.feed.snapshot()
    }

    /// True from the start of a submission until [`Self::clear`].
    pub fn is_submitting(&self) -> bool {
        self.feed.snapshot().submitting
    }

    /// True once the last round resolved every slot.
    pub fn is_completed(&self) -> bool {
        self.feed.snapshot().completed
    }

    /// The error that ended the last round, if any.
    pub fn last_error(&self) -> Option<String> {
        self.feed.snapshot().error
    }

    /// Reset to the initial state.
    pub fn clear(&mut self) {
        self.feed.reset();
    }

    fn finish(&self) {
        if let Some(on_complete) = &self.on_complete {
            on_complete();
        }
    }
}

impl<C, S> BundleRound<C, S>
where
    C: RelayConnector + Sync,
    C::Relay: Sync,
    S: Settlement + Sync,
{
    /// Run one round over `txs`, in order.
    ///
    /// Returns the slot that included the bundle, if any. On error, the
    /// error's message is also recorded in the round state.
    #[instrument(skip_all, fields(txs = txs.len()))]
    pub async fn submit(&mut self, txs: &[BundleTransaction]) -> Result<Option<u64>, RoundError> {
        self.feed.start(self.sender.options().slot_width as usize);

        let result = self.run(txs).await;
        match &result {
            Ok(_) => self.feed.complete(),
            Err(error) => {
                warn!(%error, source = ?core::error::Error::source(error), "round failed");
                self.feed.fail(error.to_string());
            }
        }

        self.finish();
        result
    }

    async fn run(&self, txs: &[BundleTransaction]) -> Result<Option<u64>, RoundError> {
        let relay = self.sender.send(txs, &self.feed).await?;
        InclusionTracker::new(&relay, &self.feed).track().await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::primitives::Address;
    use std::time::Duration;
    use volley_constants::ChainConstants;

    #[test]
    fn options_follow_config() {
        let config = VolleyConfig::new(ChainConstants::gnosis(), Address::repeat_byte(0xdf))
            .with_slot_width(5)
            .with_default_gas_price(3)
            .with_poll_interval(Duration::from_millis(10));

        let options = RoundOptions::from(&config);
        assert_eq!(options, RoundOptions::new(100).with_slot_width(5).with_default_gas_price(3));
    }

    #[test]
    fn defaults() {
        let options = RoundOptions::new(1);
        assert_eq!(options.slot_width, 20);
        assert_eq!(options.default_gas_price, 2_000_000_000);
    }
}
