use time::Duration;

use crate::domain::dealing::{create_deck_with_seed, full_deck};
use crate::domain::phases::{
    deal_opening_hands, join, reset, select_face_up_cards, set_ready, start_shuffle,
    tick_countdown, HandOutcome,
};
use crate::domain::plays::{apply_play, PlayRequest};
use crate::domain::scoring::ScoringRule;
use crate::domain::state::{Build, GameState, Phase, Seat, SeatRole, Winner};
use crate::domain::test_state_helpers::{cards, playing_state, two_player_room, T0};
use crate::errors::domain::{DomainError, PreconditionKind, ValidationKind};

fn host_only() -> GameState {
    GameState::new("ROOM01", "Ada", ScoringRule::PileCount, 30, T0)
}

fn in_countdown() -> GameState {
    let mut state = host_only();
    join(&mut state, "Bo", true, T0).unwrap();
    state
}

#[test]
fn join_seats_guest_and_starts_countdown() {
    let mut state = host_only();
    let seat = join(&mut state, "  Bo ", true, T0).unwrap();

    assert_eq!(seat, Seat::Player2);
    let guest = state.player(Seat::Player2).unwrap();
    assert_eq!(guest.name, "Bo");
    assert_eq!(guest.role, SeatRole::Guest);
    assert_eq!(state.phase, Phase::Countdown);
    assert_eq!(state.countdown_start_time, Some(T0));
    assert_eq!(state.countdown_remaining, Some(30));
}

#[test]
fn join_rejects_full_room_and_blank_name() {
    let mut state = in_countdown();
    let err = join(&mut state, "Cy", true, T0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Precondition(PreconditionKind::RoomFull, _)
    ));

    let mut state = host_only();
    let err = join(&mut state, "   ", true, T0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::EmptyPlayerName, _)
    ));
    assert_eq!(state.players.len(), 1);
}

#[test]
fn both_ready_starts_countdown_when_not_automatic() {
    let mut state = host_only();
    join(&mut state, "Bo", false, T0).unwrap();
    assert_eq!(state.phase, Phase::Waiting);

    set_ready(&mut state, Seat::Player1, true, T0).unwrap();
    assert_eq!(state.phase, Phase::Waiting);

    let later = T0 + Duration::seconds(5);
    set_ready(&mut state, Seat::Player2, true, later).unwrap();
    assert_eq!(state.phase, Phase::Countdown);
    assert_eq!(state.countdown_start_time, Some(later));
}

#[test]
fn ready_from_empty_seat_is_rejected() {
    let mut state = host_only();
    let err = set_ready(&mut state, Seat::Player2, true, T0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Precondition(PreconditionKind::UnknownSeat, _)
    ));
}

#[test]
fn countdown_tick_is_idempotent() {
    let mut state = in_countdown();
    let at = T0 + Duration::seconds(10);

    tick_countdown(&mut state, at);
    let once = state.clone();
    tick_countdown(&mut state, at);

    assert_eq!(state, once);
    assert_eq!(state.countdown_remaining, Some(20));
    assert_eq!(state.phase, Phase::Countdown);
}

#[test]
fn countdown_reaching_zero_allows_shuffle() {
    let mut state = in_countdown();
    tick_countdown(&mut state, T0 + Duration::seconds(45));
    assert_eq!(state.countdown_remaining, Some(0));
    assert_eq!(state.phase, Phase::ReadyToShuffle);

    let snapshot = state.clone();
    tick_countdown(&mut state, T0 + Duration::seconds(90));
    assert_eq!(state, snapshot);
}

#[test]
fn only_host_shuffles_and_only_in_countdown() {
    let mut state = host_only();
    let err = start_shuffle(&mut state, Seat::Player1, full_deck(), T0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Precondition(PreconditionKind::PhaseMismatch, _)
    ));

    let mut state = in_countdown();
    let err = start_shuffle(&mut state, Seat::Player2, full_deck(), T0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Precondition(PreconditionKind::SeatNotPermitted, _)
    ));
    assert!(state.deck.is_empty());

    start_shuffle(&mut state, Seat::Player1, create_deck_with_seed(7), T0).unwrap();
    assert_eq!(state.phase, Phase::CardSelection);
    assert_eq!(state.deck.len(), 52);
    assert!(state.shuffle_complete);
}

#[test]
fn face_up_selection_moves_four_cards_to_table() {
    let mut state = in_countdown();
    start_shuffle(&mut state, Seat::Player1, full_deck(), T0).unwrap();

    let before = state.clone();
    let err =
        select_face_up_cards(&mut state, Seat::Player1, &["A_hearts", "2_hearts"], T0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::FaceUpCount, _)
    ));
    assert_eq!(state, before);

    select_face_up_cards(
        &mut state,
        Seat::Player1,
        &["A_hearts", "2_hearts", "3_hearts", "4_hearts"],
        T0,
    )
    .unwrap();
    assert_eq!(state.phase, Phase::Dealing);
    assert_eq!(state.table_cards.len(), 4);
    assert_eq!(state.deck.len(), 48);
    assert!(state.card_selection_complete);
}

#[test]
fn opening_deal_starts_round_one() {
    let mut state = in_countdown();
    start_shuffle(&mut state, Seat::Player1, full_deck(), T0).unwrap();
    select_face_up_cards(
        &mut state,
        Seat::Player1,
        &["A_hearts", "2_hearts", "3_hearts", "4_hearts"],
        T0,
    )
    .unwrap();

    let err = deal_opening_hands(&mut state, Seat::Player2, T0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Precondition(PreconditionKind::SeatNotPermitted, _)
    ));

    deal_opening_hands(&mut state, Seat::Player1, T0).unwrap();
    assert_eq!(state.phase, Phase::Round1);
    assert_eq!(state.round, 1);
    assert_eq!(state.player1_hand.len(), 4);
    assert_eq!(state.player2_hand.len(), 4);
    assert_eq!(state.deck.len(), 40);
    assert_eq!(state.current_turn, Seat::Player1);
    assert_eq!(state.all_cards().len(), 52);
}

#[test]
fn emptied_hands_deal_again_from_deck() {
    let deck = [
        "2_spades", "3_spades", "4_spades", "5_spades", "6_spades", "7_spades", "8_spades",
        "9_spades", "10_spades", "J_spades",
    ];
    let mut state = playing_state(Phase::Round1, &[], &["K_clubs"], &["3_hearts"], &deck);
    state.current_turn = Seat::Player2;

    let result = apply_play(
        &mut state,
        Seat::Player2,
        &PlayRequest::trail("K_clubs"),
        T0,
    )
    .unwrap();

    assert_eq!(result.hand_outcome, HandOutcome::Redealt { deal_number: 2 });
    assert_eq!(state.round, 2);
    assert_eq!(state.phase, Phase::Round2);
    assert_eq!(state.current_turn, Seat::Player1);
    assert_eq!(
        state.player1_hand,
        cards(&["2_spades", "4_spades", "6_spades", "8_spades"])
    );
    assert_eq!(
        state.player2_hand,
        cards(&["3_spades", "5_spades", "7_spades", "9_spades"])
    );
    assert_eq!(state.deck, cards(&["10_spades", "J_spades"]));
}

#[test]
fn last_play_sweeps_table_and_builds() {
    let mut state = playing_state(Phase::Round2, &[], &["K_clubs"], &["3_hearts"], &[]);
    state.current_turn = Seat::Player2;
    state.player1_captured = cards(&["2_hearts"]);
    state.builds.push(Build {
        id: "build_3".to_string(),
        cards: cards(&["4_hearts", "5_spades"]),
        value: 9,
        owner: Seat::Player1,
    });

    let result = apply_play(
        &mut state,
        Seat::Player2,
        &PlayRequest::trail("K_clubs"),
        T0,
    )
    .unwrap();

    assert_eq!(
        result.hand_outcome,
        HandOutcome::Finished {
            winner: Winner::Seat(Seat::Player2)
        }
    );
    assert_eq!(state.phase, Phase::Finished);
    assert!(state.table_cards.is_empty());
    assert!(state.builds.is_empty());
    for card in cards(&["3_hearts", "K_clubs", "4_hearts", "5_spades"]) {
        assert!(state.player2_captured.contains(&card));
    }
    assert_eq!(state.player2_score, 4);
    assert_eq!(state.winner, Some(Winner::Seat(Seat::Player2)));
}

#[test]
fn reset_returns_to_countdown_with_fresh_deck() {
    let mut state = playing_state(Phase::Finished, &[], &[], &[], &[]);
    state.player1_captured = cards(&["2_hearts", "3_hearts"]);
    state.winner = Some(Winner::Seat(Seat::Player1));
    state.player1_ready = true;
    let later = T0 + Duration::minutes(3);

    reset(&mut state, full_deck(), later);

    assert_eq!(state.phase, Phase::Countdown);
    assert_eq!(state.deck.len(), 52);
    assert!(state.player1_captured.is_empty());
    assert_eq!(state.winner, None);
    assert_eq!(state.round, 0);
    assert_eq!(state.players.len(), 2);
    assert!(state.player1_ready);
    assert_eq!(state.countdown_start_time, Some(later));
    assert_eq!((state.player1_score, state.player2_score), (0, 0));
}

#[test]
fn reset_without_a_guest_goes_back_to_waiting() {
    let mut state = host_only();
    let later = T0 + Duration::minutes(1);

    reset(&mut state, full_deck(), later);

    assert_eq!(state.phase, Phase::Waiting);
    assert_eq!(state.countdown_start_time, None);
    assert_eq!(state.countdown_remaining, None);
    assert_eq!(state.deck.len(), 52);

    let seat = join(&mut state, "Bo", true, later).unwrap();
    assert_eq!(seat, Seat::Player2);
    assert_eq!(state.phase, Phase::Countdown);
    assert_eq!(state.countdown_start_time, Some(later));
}

#[test]
fn table_must_be_full_to_shuffle_or_deal() {
    let mut state = host_only();
    state.phase = Phase::Countdown;
    let before = state.clone();
    let err = start_shuffle(&mut state, Seat::Player1, full_deck(), T0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Precondition(PreconditionKind::TableNotFull, _)
    ));
    assert_eq!(state, before);

    let mut state = host_only();
    state.phase = Phase::Dealing;
    state.deck = full_deck();
    let before = state.clone();
    let err = deal_opening_hands(&mut state, Seat::Player1, T0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Precondition(PreconditionKind::TableNotFull, _)
    ));
    assert_eq!(state, before);
    assert!(state.player2_hand.is_empty());
}

#[test]
fn two_player_fixture_is_waiting() {
    let state = two_player_room(ScoringRule::Classic);
    assert_eq!(state.phase, Phase::Waiting);
    assert!(state.is_full());
}
