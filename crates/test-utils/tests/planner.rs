use alloy::primitives::Address;
use volley_planner::{PlanError, Planner};
use volley_test_utils::{
    oracle::{entity_id, planet, MockOracle},
    users::TEST_USERS,
};
use volley_types::{Entity, EntityKind, FilterParams, PendingAction, PlannedAction};

const SOURCE: u8 = 0x01;
const NEAR: u8 = 0x0a;
const MID: u8 = 0x0b;
const FAR: u8 = 0x0c;

fn source() -> Entity {
    Entity { resource: 1_000, resource_cap: 2_000, owner: TEST_USERS[0], ..planet(SOURCE, 0, 0) }
}

/// Source with 1000 resource, and three targets at distance 5, 10 and 20
/// costing 50, 30 and 20.
fn world() -> MockOracle {
    MockOracle::new()
        .with_entity(source())
        .with_entity(planet(FAR, 20, 0))
        .with_entity(planet(MID, 0, 10))
        .with_entity(planet(NEAR, 3, 4))
        .with_commitment(entity_id(NEAR), 50.0)
        .with_commitment(entity_id(MID), 30.0)
        .with_commitment(entity_id(FAR), 20.0)
}

fn planner(oracle: MockOracle) -> Planner<MockOracle> {
    Planner::new(oracle, TEST_USERS[0])
}

fn capture(target: u8, amount: u64) -> PlannedAction {
    PlannedAction::capture(entity_id(SOURCE), entity_id(target), amount)
}

fn pending(source: u8, target: u8) -> PendingAction {
    PendingAction { source: entity_id(source), target: entity_id(target), resource: 10 }
}

#[tokio::test]
async fn accepts_closest_first_within_budget() {
    // 10% of 1000 is 100: 50 + 30 fit, the remaining 20 buys the far target
    let planner = planner(world());
    let plan =
        planner.plan_capture(entity_id(SOURCE), &FilterParams::new(), 10.0).await.unwrap();

    assert_eq!(plan, vec![capture(NEAR, 50), capture(MID, 30), capture(FAR, 20)]);
}

#[tokio::test]
async fn rejected_target_does_not_block_cheaper_far_one() {
    // 7.5% of 1000 is 75: 50 fits, 30 does not, 20 still does
    let planner = planner(world());
    let plan =
        planner.plan_capture(entity_id(SOURCE), &FilterParams::new(), 7.5).await.unwrap();

    assert_eq!(plan, vec![capture(NEAR, 50), capture(FAR, 20)]);
    assert_eq!(
        planner.oracle().estimates(),
        vec![entity_id(NEAR), entity_id(MID), entity_id(FAR)]
    );
}

#[tokio::test]
async fn stops_scanning_once_budget_is_spent() {
    // 8% of 1000 is 80: 50 + 30 spend everything
    let planner = planner(world());
    let plan =
        planner.plan_capture(entity_id(SOURCE), &FilterParams::new(), 8.0).await.unwrap();

    assert_eq!(plan, vec![capture(NEAR, 50), capture(MID, 30)]);
    assert_eq!(planner.oracle().estimates(), vec![entity_id(NEAR), entity_id(MID)]);
}

#[tokio::test]
async fn unconfirmed_outbound_empties_the_plan() {
    let planner = planner(world().with_outbound(pending(SOURCE, 0x77)));
    let plan =
        planner.plan_capture(entity_id(SOURCE), &FilterParams::new(), 50.0).await.unwrap();

    assert!(plan.is_empty());
    assert!(planner.oracle().estimates().is_empty());
}

#[tokio::test]
async fn busy_targets_are_skipped() {
    let oracle = world().with_inbound(pending(0x77, NEAR)).with_arrival(pending(0x78, MID));
    let planner = planner(oracle);
    let plan =
        planner.plan_capture(entity_id(SOURCE), &FilterParams::new(), 10.0).await.unwrap();

    assert_eq!(plan, vec![capture(FAR, 20)]);
    assert_eq!(planner.oracle().estimates(), vec![entity_id(FAR)]);
}

#[tokio::test]
async fn filters_owner_tier_and_kind() {
    let oracle = MockOracle::new()
        .with_entity(source())
        .with_entity(Entity { owner: TEST_USERS[0], ..planet(0x20, 1, 0) })
        .with_entity(Entity { tier: 5, ..planet(0x21, 2, 0) })
        .with_entity(Entity { kind: EntityKind::Quasar, ..planet(0x22, 3, 0) })
        .with_entity(Entity { owner: Address::repeat_byte(0x99), ..planet(0x23, 4, 0) })
        .with_commitment(entity_id(0x23), 10.0);

    let params = FilterParams::new().with_tiers(0, 3);
    let plan = planner(oracle).plan_capture(entity_id(SOURCE), &params, 10.0).await.unwrap();

    assert_eq!(plan, vec![capture(0x23, 10)]);
}

#[tokio::test]
async fn default_commitment_covers_floor_and_defense() {
    // floor: 15% of cap 100 = 15, defense: 50% of 40 = 20, total 35
    let target = Entity { resource: 40, defense: 50, ..planet(0x30, 1, 1) };
    let oracle = MockOracle::new().with_entity(source()).with_entity(target);

    let plan = planner(oracle)
        .plan_capture(entity_id(SOURCE), &FilterParams::new(), 10.0)
        .await
        .unwrap();

    assert_eq!(plan, vec![capture(0x30, 35)]);
}

#[tokio::test]
async fn empty_world_plans_nothing() {
    let oracle = MockOracle::new().with_entity(source());
    let plan = planner(oracle)
        .plan_capture(entity_id(SOURCE), &FilterParams::new(), 10.0)
        .await
        .unwrap();
    assert!(plan.is_empty());
}

#[tokio::test]
async fn planning_errors() {
    let err = planner(world())
        .plan_capture(entity_id(0x55), &FilterParams::new(), 10.0)
        .await
        .unwrap_err();
    assert!(matches!(err, PlanError::UnknownSource(id) if id == entity_id(0x55)));

    let err = planner(world())
        .plan_capture(entity_id(SOURCE), &FilterParams::new(), 120.0)
        .await
        .unwrap_err();
    assert!(matches!(err, PlanError::InvalidBudget(_)));

    let err = planner(world().failing("indexer offline"))
        .plan_capture(entity_id(SOURCE), &FilterParams::new(), 10.0)
        .await
        .unwrap_err();
    assert!(matches!(err, PlanError::Oracle(_)));
    assert_eq!(err.to_string(), "oracle unavailable: mock failure: indexer offline");
}
