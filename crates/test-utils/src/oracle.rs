use crate::MockError;
use alloy::primitives::{Address, B256};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use volley_planner::WorldOracle;
use volley_types::{Coords, Entity, EntityId, EntityKind, PendingAction};

/// Entity id made of one repeated byte.
pub const fn entity_id(byte: u8) -> EntityId {
    B256::repeat_byte(byte)
}

/// An unowned tier 1 planet at `(x, y)`, with an empty resource pool.
///
/// Override fields with struct update syntax.
pub const fn planet(byte: u8, x: i64, y: i64) -> Entity {
    Entity {
        id: entity_id(byte),
        coords: Coords::new(x, y),
        resource: 0,
        resource_cap: 100,
        defense: 0,
        tier: 1,
        kind: EntityKind::Planet,
        owner: Address::ZERO,
    }
}

/// An in-memory [`WorldOracle`].
///
/// Candidate queries ignore the radius and return every known entity other
/// than the source, in insertion order. Required commitments default to the
/// requested arrival amount unless overridden per target.
#[derive(Debug, Clone, Default)]
pub struct MockOracle {
    entities: Vec<Entity>,
    outbound: Vec<PendingAction>,
    inbound: Vec<PendingAction>,
    arrivals: Vec<PendingAction>,
    commitments: HashMap<EntityId, f64>,
    failure: Option<String>,
    estimates: Arc<Mutex<Vec<EntityId>>>,
}

impl MockOracle {
    /// Create an empty oracle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity.
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    /// Add an unconfirmed action departing its source.
    pub fn with_outbound(mut self, action: PendingAction) -> Self {
        self.outbound.push(action);
        self
    }

    /// Add an unconfirmed action headed to its target.
    pub fn with_inbound(mut self, action: PendingAction) -> Self {
        self.inbound.push(action);
        self
    }

    /// Add a confirmed action that has not landed yet.
    pub fn with_arrival(mut self, action: PendingAction) -> Self {
        self.arrivals.push(action);
        self
    }

    /// Fix the required commitment for `target`.
    pub fn with_commitment(mut self, target: EntityId, required: f64) -> Self {
        self.commitments.insert(target, required);
        self
    }

    /// Fail every query with `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Targets the oracle was asked to estimate, in call order.
    pub fn estimates(&self) -> Vec<EntityId> {
        self.estimates.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), MockError> {
        match &self.failure {
            Some(message) => Err(MockError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn matching(actions: &[PendingAction], f: impl Fn(&PendingAction) -> bool) -> Vec<PendingAction> {
        actions.iter().filter(|action| f(action)).copied().collect()
    }
}

impl WorldOracle for MockOracle {
    type Error = MockError;

    async fn entity(&self, id: EntityId) -> Result<Option<Entity>, Self::Error> {
        self.check()?;
        Ok(self.entities.iter().find(|entity| entity.id == id).cloned())
    }

    async fn query_candidates(
        &self,
        source: EntityId,
        _radius_percent: u8,
    ) -> Result<Vec<Entity>, Self::Error> {
        self.check()?;
        Ok(self.entities.iter().filter(|entity| entity.id != source).cloned().collect())
    }

    async fn unconfirmed_outbound(
        &self,
        source: EntityId,
    ) -> Result<Vec<PendingAction>, Self::Error> {
        self.check()?;
        Ok(Self::matching(&self.outbound, |action| action.source == source))
    }

    async fn unconfirmed_inbound(
        &self,
        target: EntityId,
    ) -> Result<Vec<PendingAction>, Self::Error> {
        self.check()?;
        Ok(Self::matching(&self.inbound, |action| action.target == target))
    }

    async fn pending_arrivals(&self, target: EntityId) -> Result<Vec<PendingAction>, Self::Error> {
        self.check()?;
        Ok(Self::matching(&self.arrivals, |action| action.target == target))
    }

    async fn estimate_required_commitment(
        &self,
        _source: EntityId,
        target: EntityId,
        arrival: f64,
    ) -> Result<f64, Self::Error> {
        self.check()?;
        self.estimates.lock().unwrap().push(target);
        Ok(self.commitments.get(&target).copied().unwrap_or(arrival))
    }
}
