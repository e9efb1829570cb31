//! Phase state machine: waiting → countdown → (readyToShuffle) → cardSelection
//! → dealing → round1 → dealingRound2 → round2 → finished.
//!
//! Every operation validates before it mutates, so a rejected call leaves the
//! document exactly as it was. Reset is the only way backwards.

use serde::Serialize;
use time::OffsetDateTime;
use tracing::debug;

use crate::domain::dealing::{deal_hands, take_face_up};
use crate::domain::rules::{cards_per_player, FINAL_ROUND};
use crate::domain::scoring::{finalize_scores, refresh_scores};
use crate::domain::state::{
    require_host, require_phase, require_player, GameState, Phase, Player, Seat, SeatRole, Winner,
};
use crate::domain::Card;
use crate::errors::domain::{DomainError, PreconditionKind, ValidationKind};

/// What happened once both hands ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HandOutcome {
    /// At least one hand still holds cards.
    Continue,
    /// A new hand was dealt from the remaining deck.
    Redealt { deal_number: u8 },
    /// Deck exhausted; table swept and winner decided.
    Finished { winner: Winner },
}

pub fn validate_player_name(name: &str) -> Result<&str, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyPlayerName,
            "Player name must not be empty",
        ));
    }
    Ok(trimmed)
}

fn start_countdown(state: &mut GameState, now: OffsetDateTime) {
    state.phase = Phase::Countdown;
    state.countdown_start_time = Some(now);
    state.countdown_remaining = Some(state.countdown_secs);
}

/// Seat the second player. With `auto_countdown` the countdown starts as soon
/// as the table is full; otherwise both players must mark themselves ready.
pub fn join(
    state: &mut GameState,
    name: &str,
    auto_countdown: bool,
    now: OffsetDateTime,
) -> Result<Seat, DomainError> {
    let name = validate_player_name(name)?;
    if state.is_full() {
        return Err(DomainError::precondition(
            PreconditionKind::RoomFull,
            format!("Room {} already has two players", state.room_id),
        ));
    }
    require_phase(state, &[Phase::Waiting], "join the room")?;

    state.players.push(Player {
        id: Seat::Player2,
        name: name.to_string(),
        role: SeatRole::Guest,
    });
    if auto_countdown {
        start_countdown(state, now);
    }
    state.last_update = now;
    Ok(Seat::Player2)
}

/// Record readiness. Starts the countdown from `waiting` once both seats are
/// filled and ready.
pub fn set_ready(
    state: &mut GameState,
    seat: Seat,
    ready: bool,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    require_player(state, seat)?;
    state.set_ready(seat, ready);
    if state.phase == Phase::Waiting
        && state.is_full()
        && state.player1_ready
        && state.player2_ready
    {
        start_countdown(state, now);
    }
    state.last_update = now;
    Ok(())
}

/// Recompute the remaining countdown from the stored start time.
///
/// Idempotent: calling it twice at the same instant yields the same state.
/// Outside `countdown` this is a no-op.
pub fn tick_countdown(state: &mut GameState, now: OffsetDateTime) {
    if state.phase != Phase::Countdown {
        return;
    }
    let Some(started) = state.countdown_start_time else {
        start_countdown(state, now);
        return;
    };
    let elapsed = (now - started).whole_seconds().max(0);
    let remaining = i64::from(state.countdown_secs).saturating_sub(elapsed).max(0) as u32;
    state.countdown_remaining = Some(remaining);
    if remaining == 0 {
        debug!(room_id = %state.room_id, "Countdown elapsed");
        state.phase = Phase::ReadyToShuffle;
    }
    state.last_update = now;
}

fn require_full_table(state: &GameState, action: &str) -> Result<(), DomainError> {
    if state.is_full() {
        return Ok(());
    }
    Err(DomainError::precondition(
        PreconditionKind::TableNotFull,
        format!("Both seats must be filled to {action}"),
    ))
}

/// Host installs a freshly shuffled deck and moves to card selection.
pub fn start_shuffle(
    state: &mut GameState,
    seat: Seat,
    deck: Vec<Card>,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    require_host(state, seat, "shuffle")?;
    require_phase(state, &[Phase::Countdown, Phase::ReadyToShuffle], "shuffle")?;
    require_full_table(state, "shuffle")?;

    state.deck = deck;
    state.shuffle_complete = true;
    state.countdown_remaining = Some(0);
    state.phase = Phase::CardSelection;
    state.last_update = now;
    Ok(())
}

/// Host picks exactly four deck cards to lay face-up on the table.
pub fn select_face_up_cards<S: AsRef<str>>(
    state: &mut GameState,
    seat: Seat,
    card_ids: &[S],
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    require_host(state, seat, "select the face-up cards")?;
    require_phase(state, &[Phase::CardSelection], "select face-up cards")?;

    let table = take_face_up(&mut state.deck, card_ids)?;
    state.table_cards = table;
    state.card_selection_complete = true;
    state.phase = Phase::Dealing;
    state.last_update = now;
    Ok(())
}

/// Host deals the opening hands; play starts with player 1.
pub fn deal_opening_hands(
    state: &mut GameState,
    seat: Seat,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    require_host(state, seat, "deal")?;
    require_phase(state, &[Phase::Dealing], "deal")?;
    require_full_table(state, "deal")?;

    let (player1, player2) = deal_hands(&mut state.deck);
    state.player1_hand = player1;
    state.player2_hand = player2;
    state.round = 1;
    state.deal_number = 1;
    state.current_turn = Seat::Player1;
    state.dealing_complete = true;
    state.phase = Phase::Round1;
    state.last_update = now;
    Ok(())
}

/// Called after every accepted play: re-deal when both hands are empty and
/// the deck can still supply a hand, otherwise finish the game.
pub fn advance_after_play(state: &mut GameState) -> HandOutcome {
    if !(state.player1_hand.is_empty() && state.player2_hand.is_empty()) {
        return HandOutcome::Continue;
    }

    if cards_per_player(state.deck.len()) > 0 {
        state.phase = Phase::DealingRound2;
        let (player1, player2) = deal_hands(&mut state.deck);
        state.player1_hand = player1;
        state.player2_hand = player2;
        state.round = FINAL_ROUND;
        state.deal_number = state.deal_number.saturating_add(1);
        state.current_turn = Seat::Player1;
        state.phase = Phase::Round2;
        return HandOutcome::Redealt {
            deal_number: state.deal_number,
        };
    }

    let sweeper = state.last_player.unwrap_or(state.current_turn.other());
    sweep_table(state, sweeper);
    let winner = finalize_scores(state);
    state.phase = Phase::Finished;
    HandOutcome::Finished { winner }
}

/// Move every loose table card and every build's cards to `seat`'s pile.
fn sweep_table(state: &mut GameState, seat: Seat) {
    let mut swept = std::mem::take(&mut state.table_cards);
    for build in std::mem::take(&mut state.builds) {
        swept.extend(build.cards);
    }
    state.captured_mut(seat).extend(swept);
}

/// Back to `countdown` with a cleared board and a fresh deck. Players and
/// their readiness are kept. A room still missing its guest goes back to
/// `waiting` so the guest can join.
pub fn reset(state: &mut GameState, deck: Vec<Card>, now: OffsetDateTime) {
    state.deck = deck;
    state.player1_hand.clear();
    state.player2_hand.clear();
    state.table_cards.clear();
    state.builds.clear();
    state.player1_captured.clear();
    state.player2_captured.clear();
    state.round = 0;
    state.deal_number = 0;
    state.next_build_seq = 1;
    state.current_turn = Seat::Player1;
    state.winner = None;
    state.shuffle_complete = false;
    state.card_selection_complete = false;
    state.dealing_complete = false;
    state.last_play = None;
    state.last_player = None;
    refresh_scores(state);
    if state.is_full() {
        start_countdown(state, now);
    } else {
        state.phase = Phase::Waiting;
        state.countdown_start_time = None;
        state.countdown_remaining = None;
    }
    state.last_update = now;
}
