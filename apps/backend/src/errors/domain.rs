//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and DB-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    League,
    Pod,
    Participant,
    WinCondition,
    Role,
    Other(String),
}

/// Validation failure kinds (business-rule violations, all 400)
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    PodFull,
    AlreadyJoined,
    AlreadyInOpenPod,
    RosterSize,
    DuplicatePlayers,
    LeagueNotActive,
    WinnerNotInPod,
    WinConditionRequired,
    TurnOrderMismatch,
    MultipleWinners,
    RoleCycle,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation (400)
    Validation(ValidationKind, String),
    /// Actor is not eligible for the requested pod action (403)
    Eligibility(String),
    /// Requested transition is invalid for the current confirmation status (400)
    State(String),
    /// Missing resource in domain terms (404)
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures (500)
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Eligibility(d) => write!(f, "eligibility error: {d}"),
            DomainError::State(d) => write!(f, "state error: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn eligibility(detail: impl Into<String>) -> Self {
        Self::Eligibility(detail.into())
    }
    pub fn state(detail: impl Into<String>) -> Self {
        Self::State(detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e {
            sea_orm::DbErr::RecordNotFound(detail) => {
                DomainError::NotFound(NotFoundKind::Other("record".into()), detail)
            }
            other => DomainError::Infra(InfraErrorKind::Other("db".into()), other.to_string()),
        }
    }
}
