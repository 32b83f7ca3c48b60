#![allow(clippy::too_many_arguments)]
#![allow(missing_docs)]
use alloy::primitives::{B256, U256};
use volley_constants::{CONTRACT_PRECISION, MOVE_INPUT_LEN, MOVE_PUBLIC_INPUTS};

mod core_move {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        function move(
            uint256[2] a,
            uint256[2][2] b,
            uint256[2] c,
            uint256[13] input
        );
    );
}
pub use core_move::moveCall;

mod prospect {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        function prospectPlanet(uint256 location);
    );
}
pub use prospect::prospectPlanetCall;

mod world {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq)]
        function worldRadius() external view returns (uint256);
    );
}
pub use world::worldRadiusCall;

impl moveCall {
    /// Assemble a move call from a proof and the resources sent.
    ///
    /// The input array holds the circuit's public signals, then both resource
    /// quantities scaled by [`CONTRACT_PRECISION`], then a reserved zero.
    pub fn from_proof(
        a: [U256; 2],
        b: [[U256; 2]; 2],
        c: [U256; 2],
        public_inputs: [U256; MOVE_PUBLIC_INPUTS],
        resource: u64,
        secondary_resource: u64,
    ) -> Self {
        let mut input = [U256::ZERO; MOVE_INPUT_LEN];
        input[..MOVE_PUBLIC_INPUTS].copy_from_slice(&public_inputs);
        input[MOVE_PUBLIC_INPUTS] = U256::from(resource) * U256::from(CONTRACT_PRECISION);
        input[MOVE_PUBLIC_INPUTS + 1] =
            U256::from(secondary_resource) * U256::from(CONTRACT_PRECISION);
        Self { a, b, c, input }
    }

    /// Resource sent, without the contract precision.
    pub fn resource(&self) -> U256 {
        self.input[MOVE_PUBLIC_INPUTS] / U256::from(CONTRACT_PRECISION)
    }

    /// Secondary resource sent, without the contract precision.
    pub fn secondary_resource(&self) -> U256 {
        self.input[MOVE_PUBLIC_INPUTS + 1] / U256::from(CONTRACT_PRECISION)
    }
}

impl prospectPlanetCall {
    /// Prospect the entity at `location`.
    pub fn for_location(location: B256) -> Self {
        Self { location: U256::from_be_bytes(location.0) }
    }
}
