use crate::config::{env_lookup, parse_or, GameConfig};
use crate::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub game: GameConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<L>(lookup: L) -> Result<Self, AppError>
    where
        L: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: parse_or(&lookup, "CASSINO_HOST", "0.0.0.0".to_string())?,
            port: parse_or(&lookup, "CASSINO_PORT", 3001u16)?,
            game: GameConfig::from_lookup(&lookup)?,
        })
    }
}
