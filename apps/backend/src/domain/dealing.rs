//! Deck construction, shuffling and dealing.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::domain::rules::{cards_per_player, DECK_SIZE, FACE_UP_COUNT};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Generate a full 52-card deck in standard order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { rank, suit });
        }
    }
    deck
}

/// Fisher-Yates: for i from the last index down to 1, swap i with a
/// uniformly chosen index in [0, i].
pub fn shuffle_deck<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    for i in (1..deck.len()).rev() {
        let j = rng.random_range(0..=i);
        deck.swap(i, j);
    }
}

/// Fresh shuffled deck using the thread-local RNG.
pub fn create_deck() -> Vec<Card> {
    let mut deck = full_deck();
    shuffle_deck(&mut deck, &mut rand::rng());
    deck
}

/// Fresh shuffled deck, reproducible for a given seed.
pub fn create_deck_with_seed(seed: u64) -> Vec<Card> {
    let mut deck = full_deck();
    shuffle_deck(&mut deck, &mut ChaCha20Rng::seed_from_u64(seed));
    deck
}

/// Deal one hand to each player from the top of the deck, alternating:
/// even positions go to player 1, odd positions to player 2.
///
/// Deals up to four cards each; fewer when the deck runs short.
pub fn deal_hands(deck: &mut Vec<Card>) -> (Vec<Card>, Vec<Card>) {
    let count = cards_per_player(deck.len()) * 2;
    let dealt: Vec<Card> = deck.drain(..count).collect();
    let mut player1 = Vec::with_capacity(count / 2);
    let mut player2 = Vec::with_capacity(count / 2);
    for (i, card) in dealt.into_iter().enumerate() {
        if i % 2 == 0 {
            player1.push(card);
        } else {
            player2.push(card);
        }
    }
    (player1, player2)
}

/// Remove the named cards from the deck for the face-up table.
///
/// Validates everything before touching the deck: exactly four distinct ids,
/// each present in the deck.
pub fn take_face_up<S: AsRef<str>>(deck: &mut Vec<Card>, ids: &[S]) -> Result<Vec<Card>, DomainError> {
    if ids.len() != FACE_UP_COUNT {
        return Err(DomainError::validation(
            ValidationKind::FaceUpCount,
            format!(
                "Select exactly {FACE_UP_COUNT} cards to place face-up, got {}",
                ids.len()
            ),
        ));
    }

    let mut positions = Vec::with_capacity(FACE_UP_COUNT);
    for id in ids {
        let id = id.as_ref();
        let pos = deck.iter().position(|c| c.has_id(id)).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Card, format!("Card {id} is not in the deck"))
        })?;
        if positions.contains(&pos) {
            return Err(DomainError::validation(
                ValidationKind::FaceUpCount,
                format!("Card {id} was selected more than once"),
            ));
        }
        positions.push(pos);
    }

    let selected: Vec<Card> = positions.iter().map(|&p| deck[p]).collect();
    deck.retain(|c| !selected.contains(c));
    Ok(selected)
}
