use core::future::Future;
use volley_types::{Entity, EntityId, PendingAction};

/// Read-only view of the game state.
///
/// Implementors answer queries about entities and the actions queued between
/// them. Every call may return a fresher snapshot than the last one; callers
/// must not cache answers across the points where freshness matters.
pub trait WorldOracle {
    /// The error type returned when the oracle cannot answer.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Fetch a snapshot of a single entity.
    fn entity(
        &self,
        id: EntityId,
    ) -> impl Future<Output = Result<Option<Entity>, Self::Error>> + Send;

    /// Entities within `radius_percent` of the source's range.
    ///
    /// An empty answer is not an error.
    fn query_candidates(
        &self,
        source: EntityId,
        radius_percent: u8,
    ) -> impl Future<Output = Result<Vec<Entity>, Self::Error>> + Send;

    /// Actions departing `source` that are not yet confirmed.
    fn unconfirmed_outbound(
        &self,
        source: EntityId,
    ) -> impl Future<Output = Result<Vec<PendingAction>, Self::Error>> + Send;

    /// Actions headed to `target` that are not yet confirmed.
    fn unconfirmed_inbound(
        &self,
        target: EntityId,
    ) -> impl Future<Output = Result<Vec<PendingAction>, Self::Error>> + Send;

    /// Confirmed actions headed to `target` that have not landed yet.
    fn pending_arrivals(
        &self,
        target: EntityId,
    ) -> impl Future<Output = Result<Vec<PendingAction>, Self::Error>> + Send;

    /// Resource that must leave `source` so that `arrival` reaches `target`,
    /// accounting for decay over the distance.
    fn estimate_required_commitment(
        &self,
        source: EntityId,
        target: EntityId,
        arrival: f64,
    ) -> impl Future<Output = Result<f64, Self::Error>> + Send;
}
