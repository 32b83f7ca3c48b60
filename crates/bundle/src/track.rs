use crate::{BundleRelay, RoundError, StatusFeed};
use tracing::{debug, info, instrument};
use volley_types::{Resolution, SlotStatus};

/// Awaits the outcome of each submitted slot, in slot order.
///
/// Slots are awaited one at a time. Once a slot includes the bundle, every
/// later submitted slot is marked skipped without being awaited. Each
/// transition is published to the [`StatusFeed`].
#[derive(Debug)]
pub struct InclusionTracker<'a, R> {
    relay: &'a R,
    feed: &'a StatusFeed,
}

impl<'a, R> InclusionTracker<'a, R> {
    /// Create a tracker over the slots currently in `feed`.
    pub const fn new(relay: &'a R, feed: &'a StatusFeed) -> Self {
        Self { relay, feed }
    }
}

impl<R> InclusionTracker<'_, R>
where
    R: BundleRelay + Sync,
{
    /// Resolve every submitted slot.
    ///
    /// Returns the slot that included the bundle, if any. A relay failure
    /// stops tracking; slots not yet resolved keep their status.
    #[instrument(skip_all)]
    pub async fn track(&self) -> Result<Option<u64>, RoundError> {
        let slots = self.feed.snapshot().slots;
        let mut included = None;

        for (index, status) in slots.iter().enumerate() {
            let SlotStatus::Submitted(record) = status else { continue };

            if included.is_some() {
                if let Some(skipped) = status.skip() {
                    self.feed.set_slot(index, skipped);
                }
                continue;
            }

            let resolution = self.relay.await_result(record).await.map_err(|error| {
                RoundError::ResultAwait { slot: record.target_slot, source: Box::new(error) }
            })?;
            debug!(slot = record.target_slot, ?resolution, "slot resolved");

            if let Some(resolved) = status.resolve(resolution) {
                self.feed.set_slot(index, resolved);
            }
            if resolution == Resolution::Included {
                info!(slot = record.target_slot, "bundle included");
                included = Some(record.target_slot);
            }
        }

        Ok(included)
    }
}
