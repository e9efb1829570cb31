//! Scoring rules. One rule is chosen per room and drives both the live score
//! and the winner, so the two can never disagree.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::state::{GameState, Seat, Winner};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

const BIG_CASINO: Card = Card::new(Rank::Two, Suit::Spades);
const LITTLE_CASINO: Card = Card::new(Rank::Ten, Suit::Diamonds);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoringRule {
    /// Score is the number of captured cards.
    #[default]
    PileCount,
    /// Aces 1 each, 2♠ 1, 10♦ 2, most cards 2, most spades 2 (ties split 1/1).
    Classic,
}

impl FromStr for ScoringRule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pile_count" | "pilecount" => Ok(ScoringRule::PileCount),
            "classic" => Ok(ScoringRule::Classic),
            other => Err(DomainError::validation_other(format!(
                "Unknown scoring rule: {other}"
            ))),
        }
    }
}

/// Per-category points for one player under the classic rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicBreakdown {
    pub aces: u32,
    pub big_casino: u32,
    pub little_casino: u32,
    pub most_cards: u32,
    pub most_spades: u32,
}

impl ClassicBreakdown {
    pub fn total(&self) -> u32 {
        self.aces + self.big_casino + self.little_casino + self.most_cards + self.most_spades
    }
}

/// 2 to the larger count, 1 each on a tie. Nothing while both counts are zero.
fn majority_points(mine: usize, theirs: usize) -> u32 {
    if mine == 0 && theirs == 0 {
        return 0;
    }
    match mine.cmp(&theirs) {
        Ordering::Greater => 2,
        Ordering::Equal => 1,
        Ordering::Less => 0,
    }
}

fn spades(pile: &[Card]) -> usize {
    pile.iter().filter(|c| c.suit == Suit::Spades).count()
}

pub fn classic_breakdown(pile: &[Card], opponent: &[Card]) -> ClassicBreakdown {
    ClassicBreakdown {
        aces: pile.iter().filter(|c| c.rank == Rank::Ace).count() as u32,
        big_casino: if pile.contains(&BIG_CASINO) { 1 } else { 0 },
        little_casino: if pile.contains(&LITTLE_CASINO) { 2 } else { 0 },
        most_cards: majority_points(pile.len(), opponent.len()),
        most_spades: majority_points(spades(pile), spades(opponent)),
    }
}

impl ScoringRule {
    /// Scores for (player 1, player 2) from the two captured piles.
    pub fn score(self, player1: &[Card], player2: &[Card]) -> (u32, u32) {
        match self {
            ScoringRule::PileCount => (player1.len() as u32, player2.len() as u32),
            ScoringRule::Classic => (
                classic_breakdown(player1, player2).total(),
                classic_breakdown(player2, player1).total(),
            ),
        }
    }
}

pub fn decide_winner(player1_score: u32, player2_score: u32) -> Winner {
    match player1_score.cmp(&player2_score) {
        Ordering::Greater => Winner::Seat(Seat::Player1),
        Ordering::Less => Winner::Seat(Seat::Player2),
        Ordering::Equal => Winner::Tie,
    }
}

/// Recompute the live scores from the captured piles.
pub fn refresh_scores(state: &mut GameState) {
    let (p1, p2) = state
        .scoring_rule
        .score(&state.player1_captured, &state.player2_captured);
    state.player1_score = p1;
    state.player2_score = p2;
}

/// Final scores plus winner, using the room's rule.
pub fn finalize_scores(state: &mut GameState) -> Winner {
    refresh_scores(state);
    let winner = decide_winner(state.player1_score, state.player2_score);
    state.winner = Some(winner);
    winner
}
