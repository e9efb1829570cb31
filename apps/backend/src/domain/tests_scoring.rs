use crate::domain::scoring::{
    classic_breakdown, decide_winner, finalize_scores, refresh_scores, ScoringRule,
};
use crate::domain::state::{Seat, Winner};
use crate::domain::test_state_helpers::{cards, two_player_room};

#[test]
fn pile_count_scores_captured_cards() {
    let p1 = cards(&["2_hearts", "3_hearts", "4_hearts", "5_hearts", "6_hearts", "7_hearts", "8_hearts"]);
    let p2 = cards(&["2_clubs", "3_clubs", "4_clubs", "5_clubs", "6_clubs", "7_clubs"]);
    assert_eq!(ScoringRule::PileCount.score(&p1, &p2), (7, 6));
}

#[test]
fn higher_score_wins_and_equal_scores_tie() {
    assert_eq!(decide_winner(7, 6), Winner::Seat(Seat::Player1));
    assert_eq!(decide_winner(2, 9), Winner::Seat(Seat::Player2));
    assert_eq!(decide_winner(3, 3), Winner::Tie);
}

#[test]
fn finalize_uses_room_rule_for_winner() {
    let mut state = two_player_room(ScoringRule::PileCount);
    state.player1_captured = cards(&["2_hearts", "3_hearts", "4_hearts"]);
    state.player2_captured = cards(&["2_clubs", "3_clubs", "4_clubs"]);

    let winner = finalize_scores(&mut state);
    assert_eq!(winner, Winner::Tie);
    assert_eq!(state.winner, Some(Winner::Tie));
    assert_eq!((state.player1_score, state.player2_score), (3, 3));
}

#[test]
fn classic_counts_aces_and_casinos() {
    let mine = cards(&["A_hearts", "A_clubs", "2_spades", "10_diamonds"]);
    let theirs = cards(&["3_hearts", "4_spades", "5_spades"]);
    let b = classic_breakdown(&mine, &theirs);
    assert_eq!(b.aces, 2);
    assert_eq!(b.big_casino, 1);
    assert_eq!(b.little_casino, 2);
    assert_eq!(b.most_cards, 2);
    assert_eq!(b.most_spades, 0);
    assert_eq!(b.total(), 7);

    let other = classic_breakdown(&theirs, &mine);
    assert_eq!(other.most_spades, 2);
    assert_eq!(other.total(), 2);
}

#[test]
fn classic_splits_ties_one_each() {
    let mine = cards(&["3_spades", "4_hearts"]);
    let theirs = cards(&["5_spades", "6_hearts"]);
    assert_eq!(ScoringRule::Classic.score(&mine, &theirs), (2, 2));
}

#[test]
fn classic_winner_can_differ_from_pile_count() {
    let mut state = two_player_room(ScoringRule::Classic);
    // Player 2 holds more cards but player 1 holds the scoring cards.
    state.player1_captured = cards(&["A_hearts", "A_clubs", "10_diamonds", "2_spades"]);
    state.player2_captured = cards(&["3_hearts", "4_hearts", "5_hearts", "6_hearts", "7_hearts"]);

    let winner = finalize_scores(&mut state);
    assert_eq!(winner, Winner::Seat(Seat::Player1));
    assert_eq!(state.player1_score, 2 + 1 + 2 + 2);
    assert_eq!(state.player2_score, 2);
}

#[test]
fn scoring_rule_parses_config_names() {
    assert_eq!("pile_count".parse::<ScoringRule>().unwrap(), ScoringRule::PileCount);
    assert_eq!("Classic".parse::<ScoringRule>().unwrap(), ScoringRule::Classic);
    assert!("points".parse::<ScoringRule>().is_err());
}

#[test]
fn classic_awards_no_majorities_before_any_capture() {
    let b = classic_breakdown(&[], &[]);
    assert_eq!(b.most_cards, 0);
    assert_eq!(b.most_spades, 0);
    assert_eq!(ScoringRule::Classic.score(&[], &[]), (0, 0));

    let mut state = two_player_room(ScoringRule::Classic);
    refresh_scores(&mut state);
    assert_eq!((state.player1_score, state.player2_score), (0, 0));
}

#[test]
fn classic_spade_majority_needs_a_spade() {
    let mine = cards(&["3_hearts", "4_hearts"]);
    let theirs = cards(&["5_clubs"]);
    let b = classic_breakdown(&mine, &theirs);
    assert_eq!(b.most_cards, 2);
    assert_eq!(b.most_spades, 0);
    assert_eq!(classic_breakdown(&theirs, &mine).most_spades, 0);
    assert_eq!(ScoringRule::Classic.score(&mine, &theirs), (2, 0));
}
