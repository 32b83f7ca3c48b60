use crate::{PlanError, WorldOracle};
use tracing::{debug, instrument, trace};
use volley_types::{Candidate, Entity, PlannedAction};

/// Resource available for one round: `floor(budget_percent% of
/// source_resource)`.
pub fn capture_budget(source_resource: u64, budget_percent: f64) -> u64 {
    let budget = (source_resource as f64 * budget_percent / 100.0).floor();
    if budget.is_finite() && budget > 0.0 {
        budget as u64
    } else {
        0
    }
}

/// Resource that has to arrive at `target` for the capture to hold.
///
/// That is the post-capture floor, at least one unit and otherwise
/// `min_floor_percent` of the target's cap, plus what the target's defense
/// absorbs of its current resource.
pub fn required_arrival(target: &Entity, min_floor_percent: f64) -> f64 {
    let floor = (target.resource_cap as f64 * min_floor_percent / 100.0).max(1.0);
    let absorbed = target.resource as f64 * f64::from(target.defense) / 100.0;
    floor + absorbed
}

/// Tracks the remaining budget of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetLedger {
    budget: u64,
    remaining: u64,
}

impl BudgetLedger {
    /// Start a ledger holding `budget`.
    pub const fn new(budget: u64) -> Self {
        Self { budget, remaining: budget }
    }

    /// Budget the ledger started with.
    pub const fn budget(&self) -> u64 {
        self.budget
    }

    /// Budget still available.
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Budget committed so far.
    pub const fn spent(&self) -> u64 {
        self.budget - self.remaining
    }

    /// True once nothing is left to spend.
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Commit `required`, rounded up to a whole unit.
    ///
    /// Returns the committed amount, or `None` if the requirement is not a
    /// positive finite number or does not fit in the remaining budget. A
    /// rejected requirement leaves the ledger untouched.
    pub fn try_commit(&mut self, required: f64) -> Option<u64> {
        if !required.is_finite() || required <= 0.0 {
            return None;
        }
        let amount = required.ceil();
        if amount > self.remaining as f64 {
            return None;
        }
        let amount = amount as u64;
        self.remaining -= amount;
        Some(amount)
    }
}

/// Greedily spend `budget` on `candidates`, closest first.
///
/// Candidates must already be sorted by ascending distance. The scan is a
/// single forward pass: a candidate that does not fit is skipped and the scan
/// continues, so an expensive close target never blocks a cheap far one.
///
/// Pending state is re-read from the oracle during the scan because it can
/// change after the candidates were generated:
/// - any unconfirmed outbound action from the source empties the whole plan;
/// - a candidate with an unconfirmed inbound action is skipped;
/// - a candidate with a pending arrival is skipped.
#[instrument(
    skip_all,
    fields(source = %source.id, budget = budget, candidates = candidates.len())
)]
pub async fn allocate<O>(
    oracle: &O,
    source: &Entity,
    candidates: &[Candidate],
    budget: u64,
    min_floor_percent: f64,
) -> Result<Vec<PlannedAction>, PlanError>
where
    O: WorldOracle,
{
    let outbound = oracle.unconfirmed_outbound(source.id).await.map_err(PlanError::oracle)?;
    if !outbound.is_empty() {
        debug!(outbound = outbound.len(), "source has unconfirmed outbound actions");
        return Ok(Vec::new());
    }

    let mut ledger = BudgetLedger::new(budget);
    let mut planned = Vec::new();

    for candidate in candidates {
        if ledger.is_exhausted() {
            break;
        }
        let target = candidate.id();

        let inbound = oracle.unconfirmed_inbound(target).await.map_err(PlanError::oracle)?;
        if !inbound.is_empty() {
            trace!(%target, "skipping target with unconfirmed inbound actions");
            continue;
        }

        let arrivals = oracle.pending_arrivals(target).await.map_err(PlanError::oracle)?;
        if !arrivals.is_empty() {
            trace!(%target, "skipping target with pending arrivals");
            continue;
        }

        let arrival = required_arrival(&candidate.entity, min_floor_percent);
        let required = oracle
            .estimate_required_commitment(source.id, target, arrival)
            .await
            .map_err(PlanError::oracle)?;

        match ledger.try_commit(required) {
            Some(amount) => {
                trace!(%target, amount, remaining = ledger.remaining(), "committed to target");
                planned.push(PlannedAction::capture(source.id, target, amount));
            }
            None => {
                trace!(%target, required, remaining = ledger.remaining(), "target does not fit");
            }
        }
    }

    debug!(planned = planned.len(), spent = ledger.spent(), "allocation finished");
    Ok(planned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, B256};
    use proptest::prelude::*;
    use volley_types::{Coords, EntityKind};

    #[test]
    fn budget_is_floored() {
        assert_eq!(capture_budget(1000, 10.0), 100);
        assert_eq!(capture_budget(1000, 7.5), 75);
        assert_eq!(capture_budget(999, 50.0), 499);
        assert_eq!(capture_budget(0, 100.0), 0);
        assert_eq!(capture_budget(1000, 0.0), 0);
    }

    #[test]
    fn arrival_adds_floor_and_defense() {
        let target = Entity {
            id: B256::ZERO,
            coords: Coords::default(),
            resource: 200,
            resource_cap: 1000,
            defense: 25,
            tier: 1,
            kind: EntityKind::Planet,
            owner: Address::ZERO,
        };
        // 15% of 1000 plus 25% of 200
        assert_eq!(required_arrival(&target, 15.0), 200.0);
        // the floor never drops below one unit
        let tiny = Entity { resource_cap: 2, resource: 0, ..target };
        assert_eq!(required_arrival(&tiny, 1.0), 1.0);
    }

    #[test]
    fn ledger_rounds_up_and_rejects_overruns() {
        let mut ledger = BudgetLedger::new(75);
        assert_eq!(ledger.try_commit(49.2), Some(50));
        assert_eq!(ledger.remaining(), 25);
        assert_eq!(ledger.try_commit(30.0), None);
        assert_eq!(ledger.remaining(), 25);
        assert_eq!(ledger.try_commit(25.0), Some(25));
        assert!(ledger.is_exhausted());
        assert_eq!(ledger.spent(), 75);
    }

    #[test]
    fn ledger_rejects_nonsense() {
        let mut ledger = BudgetLedger::new(10);
        assert_eq!(ledger.try_commit(f64::NAN), None);
        assert_eq!(ledger.try_commit(f64::INFINITY), None);
        assert_eq!(ledger.try_commit(-3.0), None);
        assert_eq!(ledger.try_commit(0.0), None);
        assert_eq!(ledger.remaining(), 10);
    }

    proptest! {
        #[test]
        fn ledger_never_overspends(
            budget in 0u64..1_000_000,
            requirements in proptest::collection::vec(0.0f64..200_000.0, 0..64),
        ) {
            let mut ledger = BudgetLedger::new(budget);
            let mut committed = 0u64;
            for required in requirements {
                let before = ledger.remaining();
                match ledger.try_commit(required) {
                    Some(amount) => {
                        prop_assert!(amount as f64 >= required);
                        prop_assert!(amount <= before);
                        committed += amount;
                    }
                    None => prop_assert_eq!(ledger.remaining(), before),
                }
            }
            prop_assert!(committed <= budget);
            prop_assert_eq!(committed, ledger.spent());
        }
    }
}
