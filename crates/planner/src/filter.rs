use crate::{PlanError, WorldOracle};
use alloy::primitives::Address;
use tracing::{debug, instrument};
use volley_types::{Candidate, Entity, FilterParams};

/// Keep the entities worth capturing and sort them by distance from
/// `source`.
///
/// An entity passes if it is not owned by `identity`, its tier lies in the
/// accepted range, and its type matches exactly. The sort is stable, so
/// entities at equal distance keep the order they came in.
pub fn filter_candidates<I>(
    source: &Entity,
    identity: Address,
    params: &FilterParams,
    entities: I,
) -> Vec<Candidate>
where
    I: IntoIterator<Item = Entity>,
{
    let mut candidates: Vec<_> = entities
        .into_iter()
        .filter(|entity| !entity.is_owned_by(identity))
        .filter(|entity| params.accepts_tier(entity.tier))
        .filter(|entity| entity.kind == params.kind)
        .map(|entity| Candidate::new(source, entity))
        .collect();

    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    candidates
}

/// Query the oracle for entities in range of `source` and filter them.
#[instrument(skip_all, fields(source = %source.id, radius = params.max_distance_percent))]
pub async fn find_candidates<O>(
    oracle: &O,
    source: &Entity,
    identity: Address,
    params: &FilterParams,
) -> Result<Vec<Candidate>, PlanError>
where
    O: WorldOracle,
{
    let entities = oracle
        .query_candidates(source.id, params.max_distance_percent)
        .await
        .map_err(PlanError::oracle)?;
    let queried = entities.len();

    let candidates = filter_candidates(source, identity, params, entities);
    debug!(queried, eligible = candidates.len(), "filtered capture candidates");
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::B256;
    use volley_types::{Coords, EntityKind};

    const ME: Address = Address::repeat_byte(0xaa);
    const THEM: Address = Address::repeat_byte(0xbb);

    fn entity(id: u8, x: i64, tier: u8, kind: EntityKind, owner: Address) -> Entity {
        Entity {
            id: B256::with_last_byte(id),
            coords: Coords::new(x, 0),
            resource: 100,
            resource_cap: 1000,
            defense: 50,
            tier,
            kind,
            owner,
        }
    }

    #[test]
    fn filters_owner_tier_and_kind() {
        let source = entity(0, 0, 3, EntityKind::Planet, ME);
        let params = FilterParams::new().with_tiers(1, 3).with_kind(EntityKind::Planet);

        let entities = vec![
            entity(1, 10, 2, EntityKind::Planet, ME),
            entity(2, 20, 0, EntityKind::Planet, THEM),
            entity(3, 30, 4, EntityKind::Planet, THEM),
            entity(4, 40, 2, EntityKind::Quasar, THEM),
            entity(5, 50, 3, EntityKind::Planet, THEM),
            entity(6, 5, 1, EntityKind::Planet, Address::ZERO),
        ];

        let candidates = filter_candidates(&source, ME, &params, entities);
        let ids: Vec<_> = candidates.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![B256::with_last_byte(6), B256::with_last_byte(5)]);
        assert_eq!(candidates[0].distance, 5.0);
        assert_eq!(candidates[1].distance, 50.0);
    }

    #[test]
    fn equal_distances_keep_oracle_order() {
        let source = entity(0, 0, 3, EntityKind::Planet, ME);
        let params = FilterParams::new();

        let left = entity(1, -10, 1, EntityKind::Planet, THEM);
        let right = entity(2, 10, 1, EntityKind::Planet, THEM);
        let near = entity(3, 1, 1, EntityKind::Planet, THEM);

        let candidates = filter_candidates(&source, ME, &params, vec![left, right, near]);
        let ids: Vec<_> = candidates.iter().map(|c| c.id()).collect();
        assert_eq!(
            ids,
            vec![B256::with_last_byte(3), B256::with_last_byte(1), B256::with_last_byte(2)]
        );
    }

    #[test]
    fn empty_input_is_empty_output() {
        let source = entity(0, 0, 3, EntityKind::Planet, ME);
        assert!(filter_candidates(&source, ME, &FilterParams::new(), vec![]).is_empty());
    }
}
