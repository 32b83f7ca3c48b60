use crate::MockError;
use alloy::primitives::{keccak256, B256};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};
use volley_bundle::{BundleRelay, RelayConnector};
use volley_types::{BundleHandle, Resolution, SignedBundle, SubmissionRecord};

/// A scripted [`BundleRelay`].
///
/// Every broadcast and every await is recorded. Slots resolve to
/// [`Resolution::BlockPassedWithoutInclusion`] unless scripted otherwise.
/// Clones share their logs.
#[derive(Debug, Clone, Default)]
pub struct MockRelay {
    resolutions: HashMap<u64, Resolution>,
    fail_send: Option<u64>,
    fail_await: Option<u64>,
    yielding: bool,
    sends: Arc<Mutex<Vec<(u64, SignedBundle)>>>,
    awaits: Arc<Mutex<Vec<u64>>>,
}

impl MockRelay {
    /// Create a relay where every slot passes without inclusion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `slot` to `resolution`.
    pub fn with_resolution(mut self, slot: u64, resolution: Resolution) -> Self {
        self.resolutions.insert(slot, resolution);
        self
    }

    /// Reject the broadcast to `slot`.
    pub const fn failing_send(mut self, slot: u64) -> Self {
        self.fail_send = Some(slot);
        self
    }

    /// Fail while awaiting `slot`.
    pub const fn failing_await(mut self, slot: u64) -> Self {
        self.fail_await = Some(slot);
        self
    }

    /// Yield to the runtime once inside every broadcast, so concurrent
    /// broadcasts are all in flight before any of them answers.
    pub const fn yielding(mut self) -> Self {
        self.yielding = true;
        self
    }

    /// Broadcasts accepted, as `(slot, bundle)`, in call order.
    pub fn sends(&self) -> Vec<(u64, SignedBundle)> {
        self.sends.lock().unwrap().clone()
    }

    /// Slots broadcast to, in call order.
    pub fn sent_slots(&self) -> Vec<u64> {
        self.sends.lock().unwrap().iter().map(|(slot, _)| *slot).collect()
    }

    /// Slots awaited, in call order.
    pub fn awaited_slots(&self) -> Vec<u64> {
        self.awaits.lock().unwrap().clone()
    }

    /// The bundle hash reported for a broadcast to `slot`.
    pub fn bundle_hash(slot: u64) -> B256 {
        keccak256(slot.to_be_bytes())
    }
}

impl BundleRelay for MockRelay {
    type Error = MockError;

    async fn send_bundle(
        &self,
        bundle: &SignedBundle,
        slot: u64,
    ) -> Result<BundleHandle, Self::Error> {
        if self.yielding {
            tokio::task::yield_now().await;
        }
        if self.fail_send == Some(slot) {
            return Err(MockError::new(format!("relay rejected slot {slot}")));
        }
        self.sends.lock().unwrap().push((slot, bundle.clone()));
        Ok(BundleHandle {
            bundle_hash: Some(Self::bundle_hash(slot)),
            members: bundle.members().to_vec(),
        })
    }

    async fn await_result(&self, record: &SubmissionRecord) -> Result<Resolution, Self::Error> {
        let slot = record.target_slot;
        self.awaits.lock().unwrap().push(slot);
        if self.fail_await == Some(slot) {
            return Err(MockError::new(format!("lost track of slot {slot}")));
        }
        Ok(self
            .resolutions
            .get(&slot)
            .copied()
            .unwrap_or(Resolution::BlockPassedWithoutInclusion))
    }
}

/// A [`RelayConnector`] handing out clones of one [`MockRelay`].
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    relay: MockRelay,
    fail: bool,
    connects: Arc<AtomicUsize>,
}

impl MockConnector {
    /// Create a connector for `relay`.
    pub fn new(relay: MockRelay) -> Self {
        Self { relay, fail: false, connects: Default::default() }
    }

    /// Fail every handshake.
    pub const fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// The relay sessions share logs with.
    pub const fn relay(&self) -> &MockRelay {
        &self.relay
    }

    /// Number of handshakes attempted.
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl RelayConnector for MockConnector {
    type Relay = MockRelay;
    type Error = MockError;

    async fn connect(&self) -> Result<Self::Relay, Self::Error> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(MockError::new("relay unreachable"));
        }
        Ok(self.relay.clone())
    }
}
