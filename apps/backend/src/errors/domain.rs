//! Domain-level error type used across the engine, store and services.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Missing resources in domain terms.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Room,
    Card,
}

/// Action arrived in the wrong phase, on the wrong turn, or from a seat
/// that lacks the capability.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PreconditionKind {
    PhaseMismatch,
    OutOfTurn,
    SeatNotPermitted,
    RoomFull,
    UnknownSeat,
    TableNotFull,
}

/// Game-rule violations in an otherwise well-addressed action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    CaptureSumMismatch,
    BuildSumMismatch,
    NoCapturingCard,
    BuildValueOutOfRange,
    MissingBuildValue,
    FaceUpCount,
    CardNotInHand,
    ParseCard,
    EmptyPlayerName,
    Other(String),
}

/// Semantic conflicts raised by the room store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    OptimisticLock,
    RoomCodeExhausted,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Room or referenced card does not exist
    NotFound(NotFoundKind, String),
    /// Wrong phase, turn or seat
    Precondition(PreconditionKind, String),
    /// Payload fails a game-rule check
    Validation(ValidationKind, String),
    /// Concurrent modification or exhausted identifiers
    Conflict(ConflictKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Precondition(kind, d) => write!(f, "precondition {kind:?}: {d}"),
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn precondition(kind: PreconditionKind, detail: impl Into<String>) -> Self {
        Self::Precondition(kind, detail.into())
    }
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }

    /// Human-readable reason, without the kind prefix used by `Display`.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::NotFound(_, d)
            | DomainError::Precondition(_, d)
            | DomainError::Validation(_, d)
            | DomainError::Conflict(_, d) => d,
        }
    }
}
