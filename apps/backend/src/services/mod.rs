pub mod rooms;

pub use rooms::{DeckSource, RoomService, RoomSnapshot, SeatAssignment, VersionedView};
