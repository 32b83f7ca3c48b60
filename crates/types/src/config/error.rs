/// Error type for the [`crate::config`] module. Captures errors related to
/// loading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error loading from environment variable
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing an integer environment variable
    #[error("failed to parse environment variable: {0}")]
    Parse(#[from] std::num::ParseIntError),
    /// Error parsing an address environment variable
    #[error("failed to parse address: {0}")]
    Address(#[from] alloy::hex::FromHexError),
    /// Unknown chain name
    #[error(transparent)]
    Chain(#[from] volley_constants::ParseChainError),
    /// A value is out of its accepted range
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// The environment variable.
        key: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }
}
