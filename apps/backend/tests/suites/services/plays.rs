use cassino::domain::{HandOutcome, PlayAction, PlayRequest, Seat};
use cassino::ErrorCode;

use crate::support::app_builder::seeded_service;
use crate::support::game_driver::started_game;

#[test]
fn trail_moves_card_to_table_and_passes_turn() {
    let service = seeded_service();
    let dealt = started_game(&service);
    let card = dealt.state.player1_hand[0];

    let (after, result) = service
        .play_card(&dealt.room_id, Seat::Player1, &PlayRequest::trail(card.id()), None)
        .unwrap();

    assert_eq!(result.action, PlayAction::Trail);
    assert_eq!(result.hand_outcome, HandOutcome::Continue);
    assert_eq!(after.version, dealt.version + 1);
    assert_eq!(after.state.current_turn, Seat::Player2);
    assert_eq!(after.state.player1_hand.len(), 3);
    assert!(after.state.table_cards.contains(&card));
    let last = after.state.last_play.expect("last play recorded");
    assert_eq!(last.player, Seat::Player1);
    assert_eq!(last.card, card);
}

#[test]
fn out_of_turn_play_is_rejected_without_a_new_version() {
    let service = seeded_service();
    let dealt = started_game(&service);
    let card = dealt.state.player2_hand[0];

    let err = service
        .play_card(&dealt.room_id, Seat::Player2, &PlayRequest::trail(card.id()), None)
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::OutOfTurn);
    let after = service.get_room(&dealt.room_id).unwrap();
    assert_eq!(after.version, dealt.version);
    assert_eq!(after.state, dealt.state);
}

#[test]
fn card_from_the_other_hand_is_not_in_hand() {
    let service = seeded_service();
    let dealt = started_game(&service);
    let card = dealt.state.player2_hand[0];

    let err = service
        .play_card(&dealt.room_id, Seat::Player1, &PlayRequest::trail(card.id()), None)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CardNotInHand);
}

#[test]
fn stale_expected_version_is_an_optimistic_lock_conflict() {
    let service = seeded_service();
    let dealt = started_game(&service);
    let card = dealt.state.player1_hand[0];
    let stale = dealt.version - 1;

    let err = service
        .play_card(
            &dealt.room_id,
            Seat::Player1,
            &PlayRequest::trail(card.id()),
            Some(stale),
        )
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::OptimisticLock);
    assert_eq!(err.status().as_u16(), 409);
    assert_eq!(service.get_room(&dealt.room_id).unwrap().version, dealt.version);
}

#[test]
fn capture_of_cards_off_the_table_keeps_the_room_untouched() {
    let service = seeded_service();
    let dealt = started_game(&service);
    let card = dealt.state.player1_hand[0];
    let elsewhere = dealt.state.player2_hand[0].id();

    let request = PlayRequest::capture(card.id(), &[elsewhere.as_str()]);
    let err = service
        .play_card(&dealt.room_id, Seat::Player1, &request, None)
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::CaptureSumMismatch);
    assert_eq!(err.status().as_u16(), 422);
    let after = service.get_room(&dealt.room_id).unwrap();
    assert_eq!(after.version, dealt.version);
    assert_eq!(after.state, dealt.state);
}

#[test]
fn play_before_the_deal_is_a_phase_mismatch() {
    let service = seeded_service();
    let created = service.create_room("Ada").unwrap();
    let err = service
        .play_card(&created.room_id, Seat::Player1, &PlayRequest::trail("A_spades"), None)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::PhaseMismatch);
}
