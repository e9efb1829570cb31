//! Room service - bridges the pure game engine with the room store.
//!
//! Each public method is one external operation. Mutations load the latest
//! room, apply a domain operation to a copy and commit it through
//! [`RoomStore::update`], so a rejected action never changes the stored room.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::domain::dealing::{create_deck, create_deck_with_seed};
use crate::domain::game_transition::derive_game_transitions;
use crate::domain::phases::{self, validate_player_name};
use crate::domain::player_view::{player_view, PlayerView};
use crate::domain::plays::{apply_play, PlayRequest, PlayResult};
use crate::domain::{Card, GameState, Phase, Seat};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::store::{InMemoryRoomStore, Room, RoomStore, VersionedRoom};
use crate::utils::room_code::{generate_room_code, normalize_room_code};

/// Attempts at finding an unused room code before giving up.
pub const ROOM_CODE_ATTEMPTS: usize = 16;

pub type Clock = Arc<dyn Fn() -> OffsetDateTime + Send + Sync>;
pub type CodeGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Where freshly shuffled decks come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeckSource {
    #[default]
    Random,
    /// Reproducible decks; every shuffle in every room yields the same order.
    Seeded(u64),
}

impl DeckSource {
    fn deck(self) -> Vec<Card> {
        match self {
            DeckSource::Random => create_deck(),
            DeckSource::Seeded(seed) => create_deck_with_seed(seed),
        }
    }
}

/// Committed room document with its lock version.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub room_id: String,
    pub version: u64,
    pub state: GameState,
}

impl From<VersionedRoom> for RoomSnapshot {
    fn from(v: VersionedRoom) -> Self {
        Self {
            room_id: v.room.code,
            version: v.version,
            state: v.room.state,
        }
    }
}

/// Result of creating or joining a room: the caller's seat plus the room.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAssignment {
    pub room_id: String,
    pub player_id: Seat,
    pub version: u64,
    pub state: GameState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedView {
    pub version: u64,
    pub view: PlayerView,
}

pub struct RoomService<S = InMemoryRoomStore> {
    store: Arc<S>,
    config: GameConfig,
    deck_source: DeckSource,
    clock: Clock,
    code_generator: CodeGenerator,
}

impl<S> fmt::Debug for RoomService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomService")
            .field("config", &self.config)
            .field("deck_source", &self.deck_source)
            .finish_non_exhaustive()
    }
}

impl<S> Clone for RoomService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config,
            deck_source: self.deck_source,
            clock: Arc::clone(&self.clock),
            code_generator: Arc::clone(&self.code_generator),
        }
    }
}

impl RoomService<InMemoryRoomStore> {
    /// Service over a fresh in-memory store.
    pub fn in_memory(config: GameConfig) -> Self {
        Self::new(Arc::new(InMemoryRoomStore::new()), config)
    }
}

impl<S: RoomStore> RoomService<S> {
    pub fn new(store: Arc<S>, config: GameConfig) -> Self {
        Self {
            store,
            config,
            deck_source: DeckSource::Random,
            clock: Arc::new(OffsetDateTime::now_utc),
            code_generator: Arc::new(generate_room_code),
        }
    }

    pub fn with_deck_source(mut self, deck_source: DeckSource) -> Self {
        self.deck_source = deck_source;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_code_generator(mut self, code_generator: CodeGenerator) -> Self {
        self.code_generator = code_generator;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn now(&self) -> OffsetDateTime {
        (self.clock)()
    }

    /// Load, mutate a copy, commit. Logs derived transitions on success.
    fn mutate<T, F>(
        &self,
        code: &str,
        expected_version: Option<u64>,
        action: &'static str,
        f: F,
    ) -> Result<(RoomSnapshot, T), AppError>
    where
        F: FnOnce(&mut GameState, OffsetDateTime) -> Result<T, DomainError>,
    {
        let now = self.now();
        let mut before: Option<GameState> = None;

        let result = self.store.update(code, expected_version, |room| {
            before = Some(room.state.clone());
            f(&mut room.state, now)
        });

        match result {
            Ok((committed, out)) => {
                let transitions = before
                    .map(|b| derive_game_transitions(&b, &committed.room.state))
                    .unwrap_or_default();
                info!(
                    room_code = %code,
                    action,
                    version = committed.version,
                    phase = ?committed.room.state.phase,
                    ?transitions,
                    "Room updated"
                );
                Ok((RoomSnapshot::from(committed), out))
            }
            Err(err) => {
                debug!(room_code = %code, action, error = %err, "Room action rejected");
                Err(err.into())
            }
        }
    }

    /// Create a room with the caller seated as player 1 (host).
    pub fn create_room(&self, player_name: &str) -> Result<SeatAssignment, AppError> {
        let name = validate_player_name(player_name)?;
        debug!(player_name = name, "Creating room");

        for attempt in 1..=ROOM_CODE_ATTEMPTS {
            let code = (self.code_generator)();
            if self.store.contains(&code) {
                debug!(room_code = %code, attempt, "Room code collision");
                continue;
            }

            let now = self.now();
            let state = GameState::new(
                code.clone(),
                name,
                self.config.scoring_rule,
                self.config.countdown_secs,
                now,
            );
            let room = Room {
                code: code.clone(),
                created_at: now,
                state: state.clone(),
            };

            match self.store.insert(room) {
                Ok(version) => {
                    info!(room_code = %code, version, "Room created");
                    return Ok(SeatAssignment {
                        room_id: code,
                        player_id: Seat::Player1,
                        version,
                        state,
                    });
                }
                Err(DomainError::Conflict(ConflictKind::RoomCodeExhausted, _)) => {
                    debug!(room_code = %code, attempt, "Room code taken concurrently");
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(DomainError::conflict(
            ConflictKind::RoomCodeExhausted,
            format!("No free room code after {ROOM_CODE_ATTEMPTS} attempts"),
        )
        .into())
    }

    pub fn get_room(&self, code: &str) -> Result<RoomSnapshot, AppError> {
        let code = normalize_room_code(code);
        Ok(self.store.load(&code)?.into())
    }

    pub fn player_view(&self, code: &str, seat: Seat) -> Result<VersionedView, AppError> {
        let snapshot = self.get_room(code)?;
        crate::domain::state::require_player(&snapshot.state, seat)?;
        Ok(VersionedView {
            version: snapshot.version,
            view: player_view(&snapshot.state, seat),
        })
    }

    pub fn join_room(&self, code: &str, player_name: &str) -> Result<SeatAssignment, AppError> {
        let code = normalize_room_code(code);
        debug!(room_code = %code, player_name, "Joining room");
        let auto = self.config.auto_countdown_on_join;

        let (snapshot, seat) = self.mutate(&code, None, "join", |state, now| {
            phases::join(state, player_name, auto, now)
        })?;

        Ok(SeatAssignment {
            room_id: snapshot.room_id,
            player_id: seat,
            version: snapshot.version,
            state: snapshot.state,
        })
    }

    pub fn set_player_ready(
        &self,
        code: &str,
        seat: Seat,
        ready: bool,
    ) -> Result<RoomSnapshot, AppError> {
        let code = normalize_room_code(code);
        debug!(room_code = %code, seat = seat.number(), ready, "Setting ready flag");
        let (snapshot, ()) = self.mutate(&code, None, "ready", |state, now| {
            phases::set_ready(state, seat, ready, now)
        })?;
        Ok(snapshot)
    }

    pub fn start_shuffle(&self, code: &str, seat: Seat) -> Result<RoomSnapshot, AppError> {
        let code = normalize_room_code(code);
        debug!(room_code = %code, seat = seat.number(), "Starting shuffle");
        let deck_source = self.deck_source;
        let (snapshot, ()) = self.mutate(&code, None, "shuffle", |state, now| {
            phases::start_shuffle(state, seat, deck_source.deck(), now)
        })?;
        Ok(snapshot)
    }

    pub fn select_face_up_cards<T: AsRef<str>>(
        &self,
        code: &str,
        seat: Seat,
        card_ids: &[T],
    ) -> Result<RoomSnapshot, AppError> {
        let code = normalize_room_code(code);
        debug!(
            room_code = %code,
            seat = seat.number(),
            count = card_ids.len(),
            "Selecting face-up cards"
        );
        let (snapshot, ()) = self.mutate(&code, None, "face_up", |state, now| {
            phases::select_face_up_cards(state, seat, card_ids, now)
        })?;
        Ok(snapshot)
    }

    pub fn deal_cards(&self, code: &str, seat: Seat) -> Result<RoomSnapshot, AppError> {
        let code = normalize_room_code(code);
        debug!(room_code = %code, seat = seat.number(), "Dealing opening hands");
        let (snapshot, ()) = self.mutate(&code, None, "deal", |state, now| {
            phases::deal_opening_hands(state, seat, now)
        })?;
        Ok(snapshot)
    }

    /// Submit a capture, build or trail. `expected_version` enables optimistic
    /// locking against the version the client last saw.
    pub fn play_card(
        &self,
        code: &str,
        seat: Seat,
        request: &PlayRequest,
        expected_version: Option<u64>,
    ) -> Result<(RoomSnapshot, PlayResult), AppError> {
        let code = normalize_room_code(code);
        debug!(
            room_code = %code,
            seat = seat.number(),
            card_id = %request.card_id,
            action = ?request.action,
            targets = ?request.target_cards,
            build_value = ?request.build_value,
            "Playing card"
        );
        self.mutate(&code, expected_version, "play", |state, now| {
            apply_play(state, seat, request, now)
        })
    }

    /// Recompute the countdown. Outside `countdown` the stored room is
    /// returned unchanged without a new version.
    pub fn update_countdown(&self, code: &str) -> Result<RoomSnapshot, AppError> {
        let code = normalize_room_code(code);
        let current = self.store.load(&code)?;
        if current.room.state.phase != Phase::Countdown {
            return Ok(current.into());
        }
        let (snapshot, ()) = self.mutate(&code, None, "countdown", |state, now| {
            phases::tick_countdown(state, now);
            Ok(())
        })?;
        Ok(snapshot)
    }

    pub fn reset_game(&self, code: &str) -> Result<RoomSnapshot, AppError> {
        let code = normalize_room_code(code);
        debug!(room_code = %code, "Resetting game");
        let deck_source = self.deck_source;
        let (snapshot, ()) = self.mutate(&code, None, "reset", |state, now| {
            phases::reset(state, deck_source.deck(), now);
            Ok(())
        })?;
        Ok(snapshot)
    }
}
