/// Gnosis chain constants.
pub mod gnosis;

/// Test utilities for chains.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
