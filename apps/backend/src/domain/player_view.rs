//! Player view of game state - what information is visible to one seat.
//!
//! The full document exposes both hands and the deck order. A seat only
//! needs its own hand; the opponent's hand and the deck are reduced to counts.

use serde::Serialize;

use crate::domain::scoring::{classic_breakdown, ClassicBreakdown, ScoringRule};
use crate::domain::state::{Build, GameState, LastPlay, Phase, Player, Seat, Winner};
use crate::domain::Card;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub room_id: String,
    pub me: Seat,
    pub players: Vec<Player>,
    pub phase: Phase,
    pub round: u8,
    pub deal_number: u8,
    pub current_turn: Seat,
    pub is_my_turn: bool,
    pub hand: Vec<Card>,
    pub opponent_hand_count: usize,
    pub deck_count: usize,
    pub table_cards: Vec<Card>,
    pub builds: Vec<Build>,
    pub my_captured_count: usize,
    pub opponent_captured_count: usize,
    pub my_score: u32,
    pub opponent_score: u32,
    /// Per-category points, only under the classic rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_breakdown: Option<ClassicBreakdown>,
    pub countdown_remaining: Option<u32>,
    pub winner: Option<Winner>,
    pub last_play: Option<LastPlay>,
}

/// Build the view of `state` for `me`.
pub fn player_view(state: &GameState, me: Seat) -> PlayerView {
    let opponent = me.other();
    let score_breakdown = match state.scoring_rule {
        ScoringRule::Classic => Some(classic_breakdown(
            state.captured(me),
            state.captured(opponent),
        )),
        ScoringRule::PileCount => None,
    };

    let mut hand = state.hand(me).to_vec();
    hand.sort();

    PlayerView {
        room_id: state.room_id.clone(),
        me,
        players: state.players.clone(),
        phase: state.phase,
        round: state.round,
        deal_number: state.deal_number,
        current_turn: state.current_turn,
        is_my_turn: state.phase.is_play() && state.current_turn == me,
        hand,
        opponent_hand_count: state.hand(opponent).len(),
        deck_count: state.deck.len(),
        table_cards: state.table_cards.clone(),
        builds: state.builds.clone(),
        my_captured_count: state.captured(me).len(),
        opponent_captured_count: state.captured(opponent).len(),
        my_score: state.score(me),
        opponent_score: state.score(opponent),
        score_breakdown,
        countdown_remaining: state.countdown_remaining,
        winner: state.winner,
        last_play: state.last_play.clone(),
    }
}
