use crate::{allocate, capture_budget, find_candidates, PlanError, WorldOracle};
use alloy::primitives::Address;
use tracing::{debug, instrument};
use volley_types::{EntityId, FilterParams, PlannedAction};

/// Plans capture rounds for one identity.
///
/// `Planner` is generic over:
/// - `O`: A [`WorldOracle`] answering game state queries
///
/// A planner carries no state between calls; each call to
/// [`Planner::plan_capture`] is an independent round.
#[derive(Debug, Clone)]
pub struct Planner<O> {
    oracle: O,
    identity: Address,
}

impl<O> Planner<O> {
    /// Create a new planner acting for `identity`.
    pub const fn new(oracle: O, identity: Address) -> Self {
        Self { oracle, identity }
    }

    /// Get a reference to the oracle.
    pub const fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Get the identity targets are planned for.
    pub const fn identity(&self) -> Address {
        self.identity
    }
}

impl<O> Planner<O>
where
    O: WorldOracle + Sync,
{
    /// Plan the captures `source` can afford with `budget_percent` of its
    /// resource.
    ///
    /// Returns the accepted actions in the order they were accepted. A round
    /// with nothing to capture returns an empty list, not an error.
    #[instrument(skip(self, params), fields(identity = %self.identity))]
    pub async fn plan_capture(
        &self,
        source: EntityId,
        params: &FilterParams,
        budget_percent: f64,
    ) -> Result<Vec<PlannedAction>, PlanError> {
        if !(0.0..=100.0).contains(&budget_percent) {
            return Err(PlanError::InvalidBudget(budget_percent));
        }

        let source = self
            .oracle
            .entity(source)
            .await
            .map_err(PlanError::oracle)?
            .ok_or(PlanError::UnknownSource(source))?;

        let candidates = find_candidates(&self.oracle, &source, self.identity, params).await?;
        if candidates.is_empty() {
            debug!("no eligible targets");
            return Ok(Vec::new());
        }

        let budget = capture_budget(source.resource, budget_percent);
        allocate(&self.oracle, &source, &candidates, budget, params.min_resource_floor_percent)
            .await
    }
}
