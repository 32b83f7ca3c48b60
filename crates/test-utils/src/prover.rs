use crate::MockError;
use alloy::primitives::U256;
use std::sync::{Arc, Mutex};
use volley_bundle::MoveProver;
use volley_constants::MOVE_PUBLIC_INPUTS;
use volley_types::{Coords, MoveProof, MoveProofRequest};

/// A [`MoveProver`] returning a fixed proof and recording every request.
///
/// The proof's public inputs are `1..=10`, so their position in encoded
/// calldata is easy to check.
#[derive(Debug, Clone, Default)]
pub struct MockProver {
    fail_to: Vec<Coords>,
    requests: Arc<Mutex<Vec<MoveProofRequest>>>,
}

impl MockProver {
    /// Create a prover that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail proofs for moves landing on `to`.
    pub fn failing_to(mut self, to: Coords) -> Self {
        self.fail_to.push(to);
        self
    }

    /// Requests received, in call order.
    pub fn requests(&self) -> Vec<MoveProofRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The proof every successful request receives.
    pub fn proof() -> MoveProof {
        let mut public_inputs = [U256::ZERO; MOVE_PUBLIC_INPUTS];
        for (i, input) in public_inputs.iter_mut().enumerate() {
            *input = U256::from(i + 1);
        }
        MoveProof {
            a: [U256::from(11), U256::from(12)],
            b: [[U256::from(21), U256::from(22)], [U256::from(23), U256::from(24)]],
            c: [U256::from(31), U256::from(32)],
            public_inputs,
        }
    }
}

impl MoveProver for MockProver {
    type Error = MockError;

    async fn prove_move(&self, request: MoveProofRequest) -> Result<MoveProof, Self::Error> {
        self.requests.lock().unwrap().push(request);
        if self.fail_to.contains(&request.to) {
            return Err(MockError::new(format!("no proof to {}", request.to)));
        }
        Ok(Self::proof())
    }
}
