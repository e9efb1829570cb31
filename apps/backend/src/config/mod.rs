//! Runtime configuration read from `CASSINO_*` environment variables.
//!
//! Parsing goes through a lookup function so tests can supply values without
//! touching the process environment.

pub mod game;
pub mod server;

pub use game::GameConfig;
pub use server::AppConfig;

use std::str::FromStr;

use crate::AppError;

/// Parse `key` with `FromStr`, falling back to `default` when unset or blank.
pub(crate) fn parse_or<T, L>(lookup: &L, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    L: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::config(format!("{key} has invalid value {raw:?}: {e}"))),
        _ => Ok(default),
    }
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
