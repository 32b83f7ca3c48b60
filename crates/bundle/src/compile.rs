use crate::{MoveProver, Settlement};
use alloy::{primitives::Address, sol_types::SolCall};
use tracing::{debug, instrument, warn};
use volley_bindings::{moveCall, prospectPlanetCall};
use volley_types::{
    BundleTransaction, EntityId, MoveEndpoints, MoveProofRequest, PlannedAction,
    UnsignedTransaction,
};

/// Errors returned by the [`ActionCompiler`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The world radius could not be read from the core contract.
    #[error("could not read world radius: {0}")]
    WorldRadius(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// The prover could not produce a proof for a move.
    #[error("proof generation failed for target {target}: {source}")]
    Proof {
        /// Target of the failed move.
        target: EntityId,
        /// Prover error.
        #[source]
        source: Box<dyn core::error::Error + Send + Sync>,
    },
}

/// Result of compiling a batch of moves.
///
/// Compiled and failed actions are reported separately, in input order, so
/// the caller decides whether a partial batch is worth submitting.
#[derive(Debug, Default)]
pub struct CompiledActions {
    /// Actions that compiled, with their populated calls.
    pub compiled: Vec<(PlannedAction, UnsignedTransaction)>,
    /// Actions whose proof failed.
    pub failed: Vec<(PlannedAction, CompileError)>,
}

impl CompiledActions {
    /// True if every action compiled.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// The compiled calls as bundle entries, in input order.
    pub fn transactions(&self) -> Vec<BundleTransaction> {
        self.compiled.iter().map(|(_, tx)| BundleTransaction::new(tx.clone())).collect()
    }
}

/// Turns planned actions into populated calls on the core contract.
///
/// `ActionCompiler` is generic over:
/// - `S`: A [`Settlement`] used to read the world radius
/// - `P`: A [`MoveProver`] producing move proofs
#[derive(Debug, Clone)]
pub struct ActionCompiler<S, P> {
    settlement: S,
    prover: P,
    core_contract: Address,
}

impl<S, P> ActionCompiler<S, P> {
    /// Create a new compiler populating calls to `core_contract`.
    pub const fn new(settlement: S, prover: P, core_contract: Address) -> Self {
        Self { settlement, prover, core_contract }
    }

    /// Get a reference to the settlement reader.
    pub const fn settlement(&self) -> &S {
        &self.settlement
    }

    /// Get a reference to the prover.
    pub const fn prover(&self) -> &P {
        &self.prover
    }

    /// Get the core contract address.
    pub const fn core_contract(&self) -> Address {
        self.core_contract
    }

    /// Populate one `prospectPlanet` call per location.
    ///
    /// Prospecting needs no proof, so this never fails.
    pub fn compile_prospect<I>(&self, locations: I) -> Vec<UnsignedTransaction>
    where
        I: IntoIterator<Item = EntityId>,
    {
        locations
            .into_iter()
            .map(|location| {
                let call = prospectPlanetCall::for_location(location);
                UnsignedTransaction::new(self.core_contract, call.abi_encode().into())
            })
            .collect()
    }
}

impl<S, P> ActionCompiler<S, P>
where
    S: Settlement + Sync,
    P: MoveProver + Sync,
{
    /// Read the world radius from the core contract.
    pub async fn world_radius(&self) -> Result<u64, CompileError> {
        self.settlement
            .world_radius(self.core_contract)
            .await
            .map_err(|error| CompileError::WorldRadius(Box::new(error)))
    }

    /// Prove and populate a single move.
    #[instrument(skip_all, fields(entity = %action.target, resource = action.committed_resource))]
    pub async fn compile_move(
        &self,
        action: &PlannedAction,
        endpoints: MoveEndpoints,
        world_radius: u64,
    ) -> Result<UnsignedTransaction, CompileError> {
        let request = MoveProofRequest {
            from: endpoints.from,
            to: endpoints.to,
            world_radius,
            max_distance: endpoints.bounding_distance(),
        };

        let proof = self.prover.prove_move(request).await.map_err(|error| {
            CompileError::Proof { target: action.target, source: Box::new(error) }
        })?;

        let call = moveCall::from_proof(
            proof.a,
            proof.b,
            proof.c,
            proof.public_inputs,
            action.committed_resource,
            action.secondary_resource,
        );
        Ok(UnsignedTransaction::new(self.core_contract, call.abi_encode().into()))
    }

    /// Prove and populate a batch of moves.
    ///
    /// The world radius is read once, before any proof is requested, and a
    /// failure there fails the whole batch. A proof failure only fails its
    /// own action.
    #[instrument(skip_all, fields(actions = actions.len()))]
    pub async fn compile_moves(
        &self,
        actions: &[(PlannedAction, MoveEndpoints)],
    ) -> Result<CompiledActions, CompileError> {
        let world_radius = self.world_radius().await?;
        debug!(world_radius, "read world radius");

        let mut out = CompiledActions::default();
        for (action, endpoints) in actions {
            match self.compile_move(action, *endpoints, world_radius).await {
                Ok(tx) => out.compiled.push((*action, tx)),
                Err(error) => {
                    warn!(%error, "dropping action");
                    out.failed.push((*action, error));
                }
            }
        }
        Ok(out)
    }
}
