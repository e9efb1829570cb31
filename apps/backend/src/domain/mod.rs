//! Domain layer: pure game logic types and helpers.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod game_transition;
pub mod phases;
pub mod player_view;
pub mod plays;
pub mod rules;
pub mod scoring;
pub mod state;

#[cfg(test)]
mod tests_phases;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use cards_logic::{can_total, card_values, primary_value};
pub use cards_types::{Card, Rank, Suit};
pub use dealing::{create_deck, create_deck_with_seed, deal_hands};
pub use game_transition::{derive_game_transitions, GameTransition};
pub use phases::HandOutcome;
pub use player_view::{player_view, PlayerView};
pub use plays::{apply_play, PlayRequest, PlayResult};
pub use scoring::ScoringRule;
pub use state::{Build, GameState, LastPlay, Phase, PlayAction, Player, Seat, SeatRole, Winner};
