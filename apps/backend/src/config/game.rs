use crate::config::{env_lookup, parse_or};
use crate::domain::rules::DEFAULT_COUNTDOWN_SECS;
use crate::domain::ScoringRule;
use crate::AppError;

/// Per-room game settings applied when a room is created or joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub countdown_secs: u32,
    pub scoring_rule: ScoringRule,
    /// Start the countdown as soon as the second player joins instead of
    /// waiting for both ready flags.
    pub auto_countdown_on_join: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            scoring_rule: ScoringRule::PileCount,
            auto_countdown_on_join: true,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<L>(lookup: L) -> Result<Self, AppError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            countdown_secs: parse_or(&lookup, "CASSINO_COUNTDOWN_SECS", defaults.countdown_secs)?,
            scoring_rule: parse_or(&lookup, "CASSINO_SCORING_RULE", defaults.scoring_rule)?,
            auto_countdown_on_join: parse_or(
                &lookup,
                "CASSINO_AUTO_COUNTDOWN_ON_JOIN",
                defaults.auto_countdown_on_join,
            )?,
        })
    }
}
