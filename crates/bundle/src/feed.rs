use tokio::sync::watch;
use volley_types::{RoundState, SlotStatus};

/// Publishes [`RoundState`] snapshots to any number of observers.
///
/// Every change is one publication, and every publication bumps
/// [`RoundState::version`]. Observers hold a [`watch::Receiver`]; dropping it
/// unsubscribes.
#[derive(Debug)]
pub struct StatusFeed {
    tx: watch::Sender<RoundState>,
}

impl Default for StatusFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusFeed {
    /// Create a feed holding the initial, empty state.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(RoundState::default());
        Self { tx }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<RoundState> {
        self.tx.subscribe()
    }

    /// Clone the current state.
    pub fn snapshot(&self) -> RoundState {
        self.tx.borrow().clone()
    }

    fn publish(&self, f: impl FnOnce(&mut RoundState)) {
        self.tx.send_modify(|state| {
            f(state);
            state.version += 1;
        });
    }

    /// Start a round of `width` slots, all submitting.
    pub fn start(&self, width: usize) {
        self.publish(|state| {
            state.slots = vec![SlotStatus::Submitting; width];
            state.submitting = true;
            state.completed = false;
            state.error = None;
        });
    }

    /// Replace the status of slot `index`. Out of range indices are ignored.
    pub fn set_slot(&self, index: usize, status: SlotStatus) {
        self.publish(|state| {
            if let Some(slot) = state.slots.get_mut(index) {
                *slot = status;
            }
        });
    }

    /// Record the error that ended the round.
    pub fn fail(&self, error: String) {
        self.publish(|state| state.error = Some(error));
    }

    /// Mark the round completed.
    pub fn complete(&self) {
        self.publish(|state| state.completed = true);
    }

    /// Return to the initial state. The version keeps counting.
    pub fn reset(&self) {
        self.publish(|state| {
            *state = RoundState { version: state.version, ..Default::default() };
        });
    }
}
