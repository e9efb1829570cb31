//! The shared game-state document and its building blocks.
//!
//! `GameState` is serialized as-is (camelCase JSON) for transport and storage.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;

use crate::domain::scoring::ScoringRule;
use crate::domain::Card;
use crate::errors::domain::{DomainError, PreconditionKind};

/// One of the two seats at the table. Serialized as `1` or `2`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Seat {
    Player1,
    Player2,
}

impl Seat {
    pub const fn number(self) -> u8 {
        match self {
            Seat::Player1 => 1,
            Seat::Player2 => 2,
        }
    }

    pub const fn other(self) -> Seat {
        match self {
            Seat::Player1 => Seat::Player2,
            Seat::Player2 => Seat::Player1,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Seat::Player1 => 0,
            Seat::Player2 => 1,
        }
    }
}

impl TryFrom<u8> for Seat {
    type Error = DomainError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Seat::Player1),
            2 => Ok(Seat::Player2),
            _ => Err(DomainError::precondition(
                PreconditionKind::UnknownSeat,
                format!("Player id must be 1 or 2, got {n}"),
            )),
        }
    }
}

impl Serialize for Seat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for Seat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = u8::deserialize(deserializer)?;
        Seat::try_from(n).map_err(|e| D::Error::custom(e.detail().to_string()))
    }
}

/// What a seated player is allowed to do beyond playing cards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatRole {
    /// Runs the table: shuffles, picks the face-up cards, deals.
    Host,
    Guest,
}

impl SeatRole {
    pub fn can_run_table(self) -> bool {
        matches!(self, SeatRole::Host)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Seat,
    pub name: String,
    pub role: SeatRole,
}

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Room created, waiting for a second player / readiness.
    Waiting,
    /// Countdown running from `countdown_start_time`.
    Countdown,
    /// Countdown expired; the host may shuffle.
    ReadyToShuffle,
    /// Deck built; host picks four face-up cards.
    CardSelection,
    /// Table laid out; host deals the opening hands.
    Dealing,
    /// Playing the opening hand.
    Round1,
    /// Hands exhausted, dealing from the remaining deck.
    DealingRound2,
    /// Playing every subsequent hand.
    Round2,
    /// Deck and hands exhausted; winner decided.
    Finished,
}

impl Phase {
    pub fn is_play(self) -> bool {
        matches!(self, Phase::Round1 | Phase::Round2)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayAction {
    Capture,
    Build,
    Trail,
}

/// Winner of a finished game. Serialized as `1`, `2` or `"tie"`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Winner {
    Seat(Seat),
    Tie,
}

impl Serialize for Winner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Winner::Seat(seat) => seat.serialize(serializer),
            Winner::Tie => serializer.serialize_str("tie"),
        }
    }
}

impl<'de> Deserialize<'de> for Winner {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Seat(Seat),
            Text(String),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Seat(seat) => Ok(Winner::Seat(seat)),
            Repr::Text(s) if s == "tie" => Ok(Winner::Tie),
            Repr::Text(s) => Err(D::Error::custom(format!("Invalid winner: {s}"))),
        }
    }
}

/// A capturable stack of cards owned by the player who made it.
///
/// `value` is fixed at creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub id: String,
    pub cards: Vec<Card>,
    pub value: u8,
    pub owner: Seat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastPlay {
    pub player: Seat,
    pub action: PlayAction,
    pub card: Card,
    /// Cards taken off the table (including build contents), empty for build/trail.
    pub captured_cards: Vec<Card>,
    /// Matched capture total, declared build value, or the trailed card's value.
    pub value: u8,
}

/// Entire room game container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub room_id: String,
    pub players: Vec<Player>,
    pub phase: Phase,
    /// 0 before the first deal, 1 for the opening hand, 2 afterwards.
    pub round: u8,
    /// Undealt cards; index 0 is the top of the stack.
    pub deck: Vec<Card>,
    pub player1_hand: Vec<Card>,
    pub player2_hand: Vec<Card>,
    pub table_cards: Vec<Card>,
    pub builds: Vec<Build>,
    pub player1_captured: Vec<Card>,
    pub player2_captured: Vec<Card>,
    pub current_turn: Seat,
    pub player1_score: u32,
    pub player2_score: u32,
    pub winner: Option<Winner>,
    pub scoring_rule: ScoringRule,
    pub shuffle_complete: bool,
    pub card_selection_complete: bool,
    pub dealing_complete: bool,
    pub player1_ready: bool,
    pub player2_ready: bool,
    pub countdown_secs: u32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub countdown_start_time: Option<OffsetDateTime>,
    pub countdown_remaining: Option<u32>,
    /// Hands dealt so far (the opening deal is 1).
    pub deal_number: u8,
    pub next_build_seq: u32,
    pub last_play: Option<LastPlay>,
    /// Seat that made the most recent accepted play; sweeps the table at game end.
    pub last_player: Option<Seat>,
    #[serde(with = "time::serde::rfc3339")]
    pub last_update: OffsetDateTime,
}

impl GameState {
    /// Fresh document for a room with only the host seated.
    pub fn new(
        room_id: impl Into<String>,
        host_name: impl Into<String>,
        scoring_rule: ScoringRule,
        countdown_secs: u32,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            players: vec![Player {
                id: Seat::Player1,
                name: host_name.into(),
                role: SeatRole::Host,
            }],
            phase: Phase::Waiting,
            round: 0,
            deck: Vec::new(),
            player1_hand: Vec::new(),
            player2_hand: Vec::new(),
            table_cards: Vec::new(),
            builds: Vec::new(),
            player1_captured: Vec::new(),
            player2_captured: Vec::new(),
            current_turn: Seat::Player1,
            player1_score: 0,
            player2_score: 0,
            winner: None,
            scoring_rule,
            shuffle_complete: false,
            card_selection_complete: false,
            dealing_complete: false,
            player1_ready: false,
            player2_ready: false,
            countdown_secs,
            countdown_start_time: None,
            countdown_remaining: None,
            deal_number: 0,
            next_build_seq: 1,
            last_play: None,
            last_player: None,
            last_update: now,
        }
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        match seat {
            Seat::Player1 => &self.player1_hand,
            Seat::Player2 => &self.player2_hand,
        }
    }

    pub fn hand_mut(&mut self, seat: Seat) -> &mut Vec<Card> {
        match seat {
            Seat::Player1 => &mut self.player1_hand,
            Seat::Player2 => &mut self.player2_hand,
        }
    }

    pub fn captured(&self, seat: Seat) -> &[Card] {
        match seat {
            Seat::Player1 => &self.player1_captured,
            Seat::Player2 => &self.player2_captured,
        }
    }

    pub fn captured_mut(&mut self, seat: Seat) -> &mut Vec<Card> {
        match seat {
            Seat::Player1 => &mut self.player1_captured,
            Seat::Player2 => &mut self.player2_captured,
        }
    }

    pub fn score(&self, seat: Seat) -> u32 {
        match seat {
            Seat::Player1 => self.player1_score,
            Seat::Player2 => self.player2_score,
        }
    }

    pub fn ready(&self, seat: Seat) -> bool {
        match seat {
            Seat::Player1 => self.player1_ready,
            Seat::Player2 => self.player2_ready,
        }
    }

    pub fn set_ready(&mut self, seat: Seat, ready: bool) {
        match seat {
            Seat::Player1 => self.player1_ready = ready,
            Seat::Player2 => self.player2_ready = ready,
        }
    }

    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.players.iter().find(|p| p.id == seat)
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= crate::domain::rules::MAX_PLAYERS
    }

    /// Every card currently held anywhere in the document.
    pub fn all_cards(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(crate::domain::rules::DECK_SIZE);
        cards.extend_from_slice(&self.deck);
        cards.extend_from_slice(&self.player1_hand);
        cards.extend_from_slice(&self.player2_hand);
        cards.extend_from_slice(&self.table_cards);
        for build in &self.builds {
            cards.extend_from_slice(&build.cards);
        }
        cards.extend_from_slice(&self.player1_captured);
        cards.extend_from_slice(&self.player2_captured);
        cards
    }
}

/// Look up a seated player, failing when nobody sits there.
pub fn require_player(state: &GameState, seat: Seat) -> Result<&Player, DomainError> {
    state.player(seat).ok_or_else(|| {
        DomainError::precondition(
            PreconditionKind::UnknownSeat,
            format!("No player seated as player {}", seat.number()),
        )
    })
}

/// Table-running actions (shuffle, face-up selection, dealing) need the host role.
pub fn require_host(state: &GameState, seat: Seat, action: &str) -> Result<(), DomainError> {
    let player = require_player(state, seat)?;
    if !player.role.can_run_table() {
        return Err(DomainError::precondition(
            PreconditionKind::SeatNotPermitted,
            format!("Only the host can {action}"),
        ));
    }
    Ok(())
}

pub fn require_phase(state: &GameState, allowed: &[Phase], action: &str) -> Result<(), DomainError> {
    if !allowed.contains(&state.phase) {
        return Err(DomainError::precondition(
            PreconditionKind::PhaseMismatch,
            format!("Cannot {action} during phase {:?}", state.phase),
        ));
    }
    Ok(())
}
