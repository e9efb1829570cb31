//! Error codes for the Cassino backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

use super::domain::{ConflictKind, DomainError, NotFoundKind, PreconditionKind, ValidationKind};

/// Centralized error codes for the Cassino backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Resource Not Found
    /// Room code does not exist
    RoomNotFound,
    /// Referenced card id does not exist where it was expected
    CardNotFound,

    // Preconditions
    /// Action is not legal in the current phase
    PhaseMismatch,
    /// Acting seat does not hold the turn
    OutOfTurn,
    /// Acting seat lacks the capability (e.g. only the host may shuffle)
    SeatNotPermitted,
    /// Both seats are already taken
    RoomFull,
    /// Seat number is not 1 or 2, or nobody sits there
    UnknownSeat,
    /// The table needs both players before the game can start
    TableNotFull,

    // Game-rule Validation
    /// Capture targets do not add up to the played card
    CaptureSumMismatch,
    /// Build cards do not add up to the declared value
    BuildSumMismatch,
    /// No card left in hand can later capture the build
    NoCapturingCard,
    /// Build value outside 2..=14
    BuildValueOutOfRange,
    /// Build action without a declared value
    MissingBuildValue,
    /// Face-up selection is not exactly four cards
    FaceUpCount,
    /// Played card is not in the acting hand
    CardNotInHand,
    /// Card id could not be parsed
    ParseCard,
    /// Player name is blank
    EmptyPlayerName,
    /// General validation error
    ValidationError,

    // Request shape
    /// Malformed request body or path
    BadRequest,
    /// Malformed conditional header (e.g. If-Match)
    InvalidHeader,

    // Conflicts
    /// Expected version did not match the stored room
    OptimisticLock,
    /// Could not allocate a unique room code
    RoomCodeExhausted,

    // System
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::CardNotFound => "CARD_NOT_FOUND",

            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::SeatNotPermitted => "SEAT_NOT_PERMITTED",
            Self::RoomFull => "ROOM_FULL",
            Self::UnknownSeat => "UNKNOWN_SEAT",
            Self::TableNotFull => "TABLE_NOT_FULL",

            Self::CaptureSumMismatch => "CAPTURE_SUM_MISMATCH",
            Self::BuildSumMismatch => "BUILD_SUM_MISMATCH",
            Self::NoCapturingCard => "NO_CAPTURING_CARD",
            Self::BuildValueOutOfRange => "BUILD_VALUE_OUT_OF_RANGE",
            Self::MissingBuildValue => "MISSING_BUILD_VALUE",
            Self::FaceUpCount => "FACE_UP_COUNT",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::ParseCard => "PARSE_CARD",
            Self::EmptyPlayerName => "EMPTY_PLAYER_NAME",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidHeader => "INVALID_HEADER",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::RoomCodeExhausted => "ROOM_CODE_EXHAUSTED",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// The code a domain error surfaces as.
    pub fn for_domain(err: &DomainError) -> Self {
        match err {
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Room => Self::RoomNotFound,
                NotFoundKind::Card => Self::CardNotFound,
            },
            DomainError::Precondition(kind, _) => match kind {
                PreconditionKind::PhaseMismatch => Self::PhaseMismatch,
                PreconditionKind::OutOfTurn => Self::OutOfTurn,
                PreconditionKind::SeatNotPermitted => Self::SeatNotPermitted,
                PreconditionKind::RoomFull => Self::RoomFull,
                PreconditionKind::UnknownSeat => Self::UnknownSeat,
                PreconditionKind::TableNotFull => Self::TableNotFull,
            },
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::CaptureSumMismatch => Self::CaptureSumMismatch,
                ValidationKind::BuildSumMismatch => Self::BuildSumMismatch,
                ValidationKind::NoCapturingCard => Self::NoCapturingCard,
                ValidationKind::BuildValueOutOfRange => Self::BuildValueOutOfRange,
                ValidationKind::MissingBuildValue => Self::MissingBuildValue,
                ValidationKind::FaceUpCount => Self::FaceUpCount,
                ValidationKind::CardNotInHand => Self::CardNotInHand,
                ValidationKind::ParseCard => Self::ParseCard,
                ValidationKind::EmptyPlayerName => Self::EmptyPlayerName,
                ValidationKind::Other(_) => Self::ValidationError,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::OptimisticLock => Self::OptimisticLock,
                ConflictKind::RoomCodeExhausted => Self::RoomCodeExhausted,
            },
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
