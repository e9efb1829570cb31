//! Card arithmetic: numeric values per rank and reachable totals.
//!
//! An Ace is worth 1 or 14, chosen per play. Every sum or match check works
//! over the set of candidate values and succeeds if any choice works.

use std::collections::BTreeSet;

use super::cards_types::{Card, Rank};

pub const ACE_LOW: u8 = 1;
pub const ACE_HIGH: u8 = 14;

/// Candidate numeric values of a card: `[1, 14]` for an Ace, the face value
/// otherwise (J=11, Q=12, K=13).
pub fn card_values(card: Card) -> &'static [u8] {
    match card.rank {
        Rank::Ace => &[ACE_LOW, ACE_HIGH],
        Rank::Two => &[2],
        Rank::Three => &[3],
        Rank::Four => &[4],
        Rank::Five => &[5],
        Rank::Six => &[6],
        Rank::Seven => &[7],
        Rank::Eight => &[8],
        Rank::Nine => &[9],
        Rank::Ten => &[10],
        Rank::Jack => &[11],
        Rank::Queen => &[12],
        Rank::King => &[13],
    }
}

/// Single value for display and simple equality; an Ace reads as 14.
pub fn primary_value(card: Card) -> u8 {
    card_values(card).iter().copied().max().unwrap_or(ACE_HIGH)
}

/// Whether the card can stand for `value`.
pub fn card_has_value(card: Card, value: u8) -> bool {
    card_values(card).contains(&value)
}

/// Every total reachable by picking one candidate value per term.
///
/// An empty input reaches exactly `{0}`.
pub fn reachable_totals<'a, I>(terms: I) -> BTreeSet<u16>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut totals = BTreeSet::from([0u16]);
    for options in terms {
        totals = totals
            .iter()
            .flat_map(|&t| options.iter().map(move |&v| t + u16::from(v)))
            .collect();
    }
    totals
}

/// Whether some value assignment makes `cards` add up to `target`.
pub fn can_total(cards: &[Card], target: u16) -> bool {
    reachable_totals(cards.iter().map(|&c| card_values(c))).contains(&target)
}

/// First candidate value of `card` found in `totals`, preferring the high Ace.
pub fn matching_value(card: Card, totals: &BTreeSet<u16>) -> Option<u8> {
    card_values(card)
        .iter()
        .rev()
        .copied()
        .find(|&v| totals.contains(&u16::from(v)))
}
