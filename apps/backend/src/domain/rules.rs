use std::ops::RangeInclusive;

pub const MAX_PLAYERS: usize = 2;
pub const DECK_SIZE: usize = 52;
/// Cards dealt to each player per hand.
pub const HAND_SIZE: usize = 4;
/// Cards the host turns face-up onto the table before the first deal.
pub const FACE_UP_COUNT: usize = 4;
pub const DEFAULT_COUNTDOWN_SECS: u32 = 30;
/// Round number once the opening hand has been played out.
pub const FINAL_ROUND: u8 = 2;

/// Totals a build may be declared at.
pub fn build_value_range() -> RangeInclusive<u8> {
    2..=14
}

/// Number of cards each player receives when dealing from a deck of
/// `remaining` cards.
pub fn cards_per_player(remaining: usize) -> usize {
    (remaining / MAX_PLAYERS).min(HAND_SIZE)
}
