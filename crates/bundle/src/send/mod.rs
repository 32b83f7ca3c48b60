mod error;
pub use error::RoundError;

mod sender;
pub use sender::{sign_bundle, BundleSender};
