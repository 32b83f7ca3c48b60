use alloy::primitives::{Address, B256};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Identifier of an addressable entity, the 32-byte location hash.
pub type EntityId = B256;

/// Integer position of an entity in the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coords {
    /// Horizontal coordinate.
    pub x: i64,
    /// Vertical coordinate.
    pub y: i64,
}

impl Coords {
    /// Create a new coordinate pair.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        dx.hypot(dy)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Type tag of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A regular planet.
    Planet,
    /// An asteroid field, produces the secondary resource.
    AsteroidField,
    /// A foundry.
    Foundry,
    /// A spacetime rip.
    SpacetimeRip,
    /// A quasar.
    Quasar,
}

/// Snapshot of an entity as reported by the game oracle.
///
/// Snapshots are immutable. The oracle may hand out a fresher snapshot for
/// the same [`EntityId`] on each query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Location identifier.
    pub id: EntityId,
    /// Position in the world.
    pub coords: Coords,
    /// Current resource level.
    pub resource: u64,
    /// Maximum resource level.
    pub resource_cap: u64,
    /// Defense, in percent.
    pub defense: u8,
    /// Tier (level).
    pub tier: u8,
    /// Type tag.
    pub kind: EntityKind,
    /// Current owner.
    pub owner: Address,
}

impl Entity {
    /// Distance between this entity and `other`.
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.coords.distance(&other.coords)
    }

    /// True if the entity is owned by `identity`.
    pub fn is_owned_by(&self, identity: Address) -> bool {
        self.owner == identity
    }
}

/// An action that is queued or in flight between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAction {
    /// Entity the action departs from.
    pub source: EntityId,
    /// Entity the action is headed to.
    pub target: EntityId,
    /// Resource the action carries.
    pub resource: u64,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn euclidean_distance() {
        let a = Coords::new(0, 0);
        let b = Coords::new(3, -4);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&EntityKind::AsteroidField).unwrap();
        assert_eq!(json, "\"asteroid_field\"");
    }
}
