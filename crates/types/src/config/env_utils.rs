use super::ConfigError;
use alloy::primitives::Address;
use std::{borrow::Cow, env, str::FromStr};

/// Read `key`, treating unset and blank values alike.
pub fn load_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().map(|val| val.trim().to_owned()).filter(|val| !val.is_empty())
}

/// Read a required `key`.
pub fn load_string(key: &str) -> Result<String, ConfigError> {
    load_string_opt(key).ok_or_else(|| ConfigError::missing(key))
}

fn parse_opt<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    ConfigError: From<T::Err>,
{
    load_string_opt(key).map(|val| val.parse::<T>()).transpose().map_err(Into::into)
}

/// Read an optional count or duration in milliseconds.
pub fn load_u64_opt(key: &str) -> Result<Option<u64>, ConfigError> {
    parse_opt(key)
}

/// Read an optional wei amount.
pub fn load_u128_opt(key: &str) -> Result<Option<u128>, ConfigError> {
    parse_opt(key)
}

/// Read an optional endpoint override.
pub fn load_url_opt(key: &str) -> Option<Cow<'static, str>> {
    load_string_opt(key).map(Into::into)
}

/// Read a required contract address.
pub fn load_address(key: &str) -> Result<Address, ConfigError> {
    load_string(key)?.parse().map_err(Into::into)
}
