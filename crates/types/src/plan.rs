use crate::{Coords, Entity, EntityId, EntityKind};
use serde::{Deserialize, Serialize};

/// Parameters narrowing the set of capture candidates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// Maximum search radius, expressed as a percentage of the source's
    /// resource. The oracle converts this into a distance cutoff.
    pub max_distance_percent: u8,
    /// Lowest accepted tier, inclusive.
    pub min_tier: u8,
    /// Highest accepted tier, inclusive.
    pub max_tier: u8,
    /// Required entity type.
    pub kind: EntityKind,
    /// Resource level, as a percentage of the target's cap, that must remain
    /// on the target after capture.
    pub min_resource_floor_percent: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterParams {
    /// Filter parameters matching planets of any tier within 85% range,
    /// leaving a 15% floor.
    pub const fn new() -> Self {
        Self {
            max_distance_percent: 85,
            min_tier: 0,
            max_tier: 9,
            kind: EntityKind::Planet,
            min_resource_floor_percent: 15.0,
        }
    }

    /// Set the search radius percentage.
    pub const fn with_max_distance_percent(mut self, percent: u8) -> Self {
        self.max_distance_percent = percent;
        self
    }

    /// Set the accepted tier range, inclusive on both ends.
    pub const fn with_tiers(mut self, min_tier: u8, max_tier: u8) -> Self {
        self.min_tier = min_tier;
        self.max_tier = max_tier;
        self
    }

    /// Set the required entity type.
    pub const fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the post-capture resource floor percentage.
    pub const fn with_min_resource_floor_percent(mut self, percent: f64) -> Self {
        self.min_resource_floor_percent = percent;
        self
    }

    /// True if `tier` falls in the accepted range.
    pub const fn accepts_tier(&self, tier: u8) -> bool {
        self.min_tier <= tier && tier <= self.max_tier
    }
}

/// A target entity scored against a source.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The target snapshot.
    pub entity: Entity,
    /// Euclidean distance from the source.
    pub distance: f64,
}

impl Candidate {
    /// Score `entity` against `source`.
    pub fn new(source: &Entity, entity: Entity) -> Self {
        let distance = source.distance_to(&entity);
        Self { entity, distance }
    }

    /// Target identifier.
    pub const fn id(&self) -> EntityId {
        self.entity.id
    }
}

/// One action the planner committed to.
///
/// `committed_resource` is always a whole number; the settlement layer
/// rejects fractional commitments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedAction {
    /// Entity the action departs from.
    pub source: EntityId,
    /// Entity the action targets.
    pub target: EntityId,
    /// Primary resource sent.
    pub committed_resource: u64,
    /// Secondary resource sent.
    pub secondary_resource: u64,
}

impl PlannedAction {
    /// A capture action carrying only the primary resource.
    pub const fn capture(source: EntityId, target: EntityId, committed_resource: u64) -> Self {
        Self { source, target, committed_resource, secondary_resource: 0 }
    }
}

/// Coordinates of both ends of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEndpoints {
    /// Where the move departs.
    pub from: Coords,
    /// Where the move lands.
    pub to: Coords,
}

impl MoveEndpoints {
    /// Create a new pair of endpoints.
    pub const fn new(from: Coords, to: Coords) -> Self {
        Self { from, to }
    }

    /// Endpoints of a move between two entity snapshots.
    pub const fn between(source: &Entity, target: &Entity) -> Self {
        Self { from: source.coords, to: target.coords }
    }

    /// Integer displacement `(dx, dy)`.
    pub const fn displacement(&self) -> (i64, i64) {
        (self.to.x - self.from.x, self.to.y - self.from.y)
    }

    /// Smallest whole distance bounding the move, `ceil(sqrt(dx² + dy²))`.
    pub fn bounding_distance(&self) -> u64 {
        let (dx, dy) = self.displacement();
        (dx as f64).hypot(dy as f64).ceil() as u64
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tier_range_is_inclusive() {
        let params = FilterParams::new().with_tiers(2, 4);
        assert!(!params.accepts_tier(1));
        assert!(params.accepts_tier(2));
        assert!(params.accepts_tier(4));
        assert!(!params.accepts_tier(5));
    }

    #[test]
    fn bounding_distance_rounds_up() {
        let exact = MoveEndpoints::new(Coords::new(0, 0), Coords::new(3, 4));
        assert_eq!(exact.bounding_distance(), 5);
        assert_eq!(exact.displacement(), (3, 4));

        let inexact = MoveEndpoints::new(Coords::new(1, 1), Coords::new(2, 2));
        assert_eq!(inexact.bounding_distance(), 2);

        let still = MoveEndpoints::new(Coords::new(7, 7), Coords::new(7, 7));
        assert_eq!(still.bounding_distance(), 0);
    }
}
