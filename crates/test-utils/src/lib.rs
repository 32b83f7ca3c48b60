pub mod oracle;
pub mod prover;
pub mod provider;
pub mod relay;
pub mod rounds;
pub mod users;

pub use volley_constants::test_utils as test_constants;

/// Error returned by every mock in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mock failure: {0}")]
pub struct MockError(pub String);

impl MockError {
    /// Create a new mock error.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Install a tracing subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
