//! Room persistence: one versioned game document per room code.
//!
//! Mutations go through [`RoomStore::update`], which runs the caller's closure
//! against a copy of the latest committed room while holding that room's write
//! guard. The copy replaces the stored room only when the closure succeeds, so
//! a rejected action never leaves a partial write and two writers on the same
//! room are applied one after the other.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::GameState;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub code: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub state: GameState,
}

/// A room together with its lock version. Every committed update bumps the
/// version by one; a freshly inserted room is at version 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedRoom {
    pub version: u64,
    pub room: Room,
}

pub trait RoomStore: Send + Sync {
    /// Store a new room. Fails with `RoomCodeExhausted` if the code is taken.
    fn insert(&self, room: Room) -> Result<u64, DomainError>;

    fn load(&self, code: &str) -> Result<VersionedRoom, DomainError>;

    fn contains(&self, code: &str) -> bool;

    /// Apply `f` to the latest room and commit it atomically.
    ///
    /// With `expected_version` set, a mismatch is rejected with
    /// `OptimisticLock` before `f` runs.
    fn update<T, F>(
        &self,
        code: &str,
        expected_version: Option<u64>,
        f: F,
    ) -> Result<(VersionedRoom, T), DomainError>
    where
        F: FnOnce(&mut Room) -> Result<T, DomainError>,
        Self: Sized;
}

fn room_not_found(code: &str) -> DomainError {
    DomainError::not_found(NotFoundKind::Room, format!("Room {code} not found"))
}

#[derive(Debug, Default)]
pub struct InMemoryRoomStore {
    rooms: DashMap<String, VersionedRoom>,
}

impl InMemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl RoomStore for InMemoryRoomStore {
    fn insert(&self, room: Room) -> Result<u64, DomainError> {
        match self.rooms.entry(room.code.clone()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::RoomCodeExhausted,
                format!("Room code {} is already in use", room.code),
            )),
            Entry::Vacant(slot) => {
                slot.insert(VersionedRoom { version: 1, room });
                Ok(1)
            }
        }
    }

    fn load(&self, code: &str) -> Result<VersionedRoom, DomainError> {
        self.rooms
            .get(code)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| room_not_found(code))
    }

    fn contains(&self, code: &str) -> bool {
        self.rooms.contains_key(code)
    }

    fn update<T, F>(
        &self,
        code: &str,
        expected_version: Option<u64>,
        f: F,
    ) -> Result<(VersionedRoom, T), DomainError>
    where
        F: FnOnce(&mut Room) -> Result<T, DomainError>,
    {
        let mut entry = self.rooms.get_mut(code).ok_or_else(|| room_not_found(code))?;

        if let Some(expected) = expected_version {
            if expected != entry.version {
                return Err(DomainError::conflict(
                    ConflictKind::OptimisticLock,
                    format!(
                        "Room lock version mismatch: expected {expected}, but room has version {}",
                        entry.version
                    ),
                ));
            }
        }

        let mut working = entry.room.clone();
        let out = f(&mut working)?;

        entry.room = working;
        entry.version += 1;
        Ok((entry.value().clone(), out))
    }
}
