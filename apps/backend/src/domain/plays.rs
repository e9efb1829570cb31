//! Play-action engine: capture, build and trail.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::cards_logic::{card_has_value, card_values, matching_value, primary_value, reachable_totals};
use crate::domain::phases::{advance_after_play, HandOutcome};
use crate::domain::rules::build_value_range;
use crate::domain::scoring::refresh_scores;
use crate::domain::state::{require_phase, require_player, Build, GameState, LastPlay, Phase, PlayAction, Seat};
use crate::domain::Card;
use crate::errors::domain::{DomainError, PreconditionKind, ValidationKind};

/// A single play submitted by the seat holding the turn.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    pub card_id: String,
    pub action: PlayAction,
    /// Table card ids (and, for captures, build ids) the play acts on.
    #[serde(default)]
    pub target_cards: Vec<String>,
    #[serde(default)]
    pub build_value: Option<u8>,
}

impl PlayRequest {
    pub fn capture(card_id: impl Into<String>, targets: &[&str]) -> Self {
        Self {
            card_id: card_id.into(),
            action: PlayAction::Capture,
            target_cards: targets.iter().map(|s| s.to_string()).collect(),
            build_value: None,
        }
    }

    pub fn build(card_id: impl Into<String>, targets: &[&str], value: u8) -> Self {
        Self {
            card_id: card_id.into(),
            action: PlayAction::Build,
            target_cards: targets.iter().map(|s| s.to_string()).collect(),
            build_value: Some(value),
        }
    }

    pub fn trail(card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            action: PlayAction::Trail,
            target_cards: Vec::new(),
            build_value: None,
        }
    }
}

/// Result of an accepted play, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResult {
    pub card: Card,
    pub action: PlayAction,
    /// Cards moved to the player's pile besides the played card.
    pub captured: Vec<Card>,
    pub value: u8,
    /// Id of the build created, for build actions.
    pub build_id: Option<String>,
    pub hand_outcome: HandOutcome,
}

/// Validated effect of a play, computed before anything is mutated.
enum Resolved {
    Capture {
        table_positions: Vec<usize>,
        build_positions: Vec<usize>,
        value: u8,
    },
    Build {
        table_positions: Vec<usize>,
        value: u8,
    },
    Trail,
}

/// Unique ids in submission order; a repeated id counts once.
fn unique_targets(targets: &[String]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::with_capacity(targets.len());
    for t in targets {
        if !seen.contains(&t.as_str()) {
            seen.push(t.as_str());
        }
    }
    seen
}

/// Positions of named table cards that are actually on the table.
fn table_positions(state: &GameState, ids: &[&str]) -> Vec<usize> {
    ids.iter()
        .filter_map(|id| state.table_cards.iter().position(|c| c.has_id(id)))
        .collect()
}

fn build_positions(state: &GameState, ids: &[&str]) -> Vec<usize> {
    ids.iter()
        .filter_map(|id| state.builds.iter().position(|b| b.id == *id))
        .collect()
}

fn describe_values(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "none".to_string();
    }
    cards
        .iter()
        .map(|&c| {
            card_values(c)
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn resolve_capture(state: &GameState, card: Card, ids: &[&str]) -> Result<Resolved, DomainError> {
    let table_positions = table_positions(state, ids);
    let build_positions = build_positions(state, ids);

    let terms = table_positions
        .iter()
        .map(|&p| card_values(state.table_cards[p]))
        .chain(
            build_positions
                .iter()
                .map(|&p| std::slice::from_ref(&state.builds[p].value)),
        );
    let totals = reachable_totals(terms);

    let value = matching_value(card, &totals).ok_or_else(|| {
        let totals: Vec<String> = totals.iter().map(u16::to_string).collect();
        DomainError::validation(
            ValidationKind::CaptureSumMismatch,
            format!(
                "Targets add up to {} but {card} is worth {}",
                totals.join(" or "),
                describe_values(&[card])
            ),
        )
    })?;

    Ok(Resolved::Capture {
        table_positions,
        build_positions,
        value,
    })
}

fn resolve_build(
    state: &GameState,
    seat: Seat,
    hand_pos: usize,
    card: Card,
    ids: &[&str],
    build_value: Option<u8>,
) -> Result<Resolved, DomainError> {
    let value = build_value.ok_or_else(|| {
        DomainError::validation(ValidationKind::MissingBuildValue, "A build needs a build value")
    })?;
    let range = build_value_range();
    if !range.contains(&value) {
        return Err(DomainError::validation(
            ValidationKind::BuildValueOutOfRange,
            format!("Build value must be between {} and {}, got {value}", range.start(), range.end()),
        ));
    }

    let others: Vec<Card> = state
        .hand(seat)
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != hand_pos)
        .map(|(_, &c)| c)
        .collect();
    if !others.iter().any(|&c| card_has_value(c, value)) {
        return Err(DomainError::validation(
            ValidationKind::NoCapturingCard,
            format!(
                "You need another card worth {value} in hand to build {value}; your other cards are worth: {}",
                describe_values(&others)
            ),
        ));
    }

    let table_positions = table_positions(state, ids);
    let totals = reachable_totals(
        std::iter::once(card_values(card))
            .chain(table_positions.iter().map(|&p| card_values(state.table_cards[p]))),
    );
    if !totals.contains(&u16::from(value)) {
        let totals: Vec<String> = totals.iter().map(u16::to_string).collect();
        return Err(DomainError::validation(
            ValidationKind::BuildSumMismatch,
            format!("Build cards add up to {} but the build value is {value}", totals.join(" or ")),
        ));
    }

    Ok(Resolved::Build {
        table_positions,
        value,
    })
}

/// Remove the given positions from `items`, returning the removed elements in
/// ascending position order.
fn take_positions<T>(items: &mut Vec<T>, positions: &[usize]) -> Vec<T> {
    let mut sorted = positions.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    let mut taken: Vec<T> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        taken.push(items.remove(p));
    }
    taken.reverse();
    taken
}

/// Apply a play for `seat`, enforcing phase, turn, hand ownership and the
/// action's arithmetic. On error the state is untouched.
pub fn apply_play(
    state: &mut GameState,
    seat: Seat,
    request: &PlayRequest,
    now: OffsetDateTime,
) -> Result<PlayResult, DomainError> {
    require_phase(state, &[Phase::Round1, Phase::Round2], "play a card")?;
    require_player(state, seat)?;

    if state.current_turn != seat {
        return Err(DomainError::precondition(
            PreconditionKind::OutOfTurn,
            format!("It is player {}'s turn", state.current_turn.number()),
        ));
    }

    let hand_pos = state
        .hand(seat)
        .iter()
        .position(|c| c.has_id(&request.card_id))
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::CardNotInHand,
                format!("Card {} is not in your hand", request.card_id),
            )
        })?;
    let card = state.hand(seat)[hand_pos];
    let ids = unique_targets(&request.target_cards);

    let resolved = match request.action {
        PlayAction::Capture => resolve_capture(state, card, &ids)?,
        PlayAction::Build => resolve_build(state, seat, hand_pos, card, &ids, request.build_value)?,
        PlayAction::Trail => Resolved::Trail,
    };

    // Validation is complete; mutate from here on.
    state.hand_mut(seat).remove(hand_pos);

    let mut captured = Vec::new();
    let mut build_id = None;
    let value = match resolved {
        Resolved::Capture {
            table_positions,
            build_positions,
            value,
        } => {
            captured.extend(take_positions(&mut state.table_cards, &table_positions));
            for build in take_positions(&mut state.builds, &build_positions) {
                captured.extend(build.cards);
            }
            let pile = state.captured_mut(seat);
            pile.push(card);
            pile.extend_from_slice(&captured);
            value
        }
        Resolved::Build {
            table_positions,
            value,
        } => {
            let mut cards = vec![card];
            cards.extend(take_positions(&mut state.table_cards, &table_positions));
            let id = format!("build_{}", state.next_build_seq);
            state.next_build_seq += 1;
            state.builds.push(Build {
                id: id.clone(),
                cards,
                value,
                owner: seat,
            });
            build_id = Some(id);
            value
        }
        Resolved::Trail => {
            state.table_cards.push(card);
            primary_value(card)
        }
    };

    state.last_play = Some(LastPlay {
        player: seat,
        action: request.action,
        card,
        captured_cards: captured.clone(),
        value,
    });
    state.last_player = Some(seat);
    state.current_turn = seat.other();
    refresh_scores(state);
    let hand_outcome = advance_after_play(state);
    state.last_update = now;

    Ok(PlayResult {
        card,
        action: request.action,
        captured,
        value,
        build_id,
        hand_outcome,
    })
}
