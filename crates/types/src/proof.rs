use crate::Coords;
use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use volley_constants::MOVE_PUBLIC_INPUTS;

/// Inputs to the move proof: both endpoints, the world radius bound, and the
/// distance bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveProofRequest {
    /// Departure coordinates.
    pub from: Coords,
    /// Arrival coordinates.
    pub to: Coords,
    /// Declared world radius.
    pub world_radius: u64,
    /// Bounding distance of the move.
    pub max_distance: u64,
}

/// A groth16 proof tuple for a move, ready for the core contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveProof {
    /// Proof point `a`.
    pub a: [U256; 2],
    /// Proof point `b`.
    pub b: [[U256; 2]; 2],
    /// Proof point `c`.
    pub c: [U256; 2],
    /// The circuit's public signals.
    pub public_inputs: [U256; MOVE_PUBLIC_INPUTS],
}
