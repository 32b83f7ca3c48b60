mod flashbots;

mod provider;
pub use provider::SettlementError;
