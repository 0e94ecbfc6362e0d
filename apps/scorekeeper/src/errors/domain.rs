//! Domain-level error type used across the engine.
//!
//! Every public engine operation returns `Result<T, DomainError>`. The
//! presentation layer is responsible for turning these into user-facing
//! messages; the engine only produces a precise, typed failure reason.

use thiserror::Error;

use crate::domain::progression::Phase;

/// Validation error kinds for out-of-domain input
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidBid,
    InvalidTricks,
    InvalidBonus,
    InvalidCardsDealt,
    MissingPlayer,
    DuplicatePlayer,
    PlayerCount,
    TotalRounds,
    RoundOutOfRange,
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Player,
    Round,
}

/// Central domain error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Out-of-domain numeric input or a malformed round submission
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    /// Operation attempted in the wrong progression phase
    #[error("state error: expected {expected}, actual {actual}")]
    State { expected: String, actual: Phase },
    /// Reference to an unknown player or round
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Engine configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn state(expected: impl Into<String>, actual: Phase) -> Self {
        Self::State {
            expected: expected.into(),
            actual,
        }
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }

    /// Stable, machine-readable code for the UI layer.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(..) => "INVALID_INPUT",
            DomainError::State { .. } => "INVALID_STATE",
            DomainError::NotFound(..) => "NOT_FOUND",
            DomainError::Config(_) => "CONFIG_ERROR",
        }
    }
}
