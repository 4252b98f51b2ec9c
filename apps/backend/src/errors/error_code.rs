//! Error codes for the league backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the league backend API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Access denied
    Forbidden,
    /// User not found in database
    ForbiddenUserNotFound,

    // Request Validation
    /// Invalid pod ID provided
    InvalidPodId,
    /// Invalid league ID provided
    InvalidLeagueId,
    /// Pod already holds the maximum number of participants
    PodFull,
    /// Player already joined this pod
    AlreadyJoined,
    /// Player already sits in another open pod of the league
    AlreadyInOpenPod,
    /// Roster must hold between one and four unique players
    RosterSize,
    /// Duplicate players in the roster
    DuplicatePlayers,
    /// League is not accepting new pods
    LeagueNotActive,
    /// Declared winner is not a participant of the pod
    WinnerNotInPod,
    /// A win declaration requires a win condition
    WinConditionRequired,
    /// Turn order must be a permutation of the pod's players
    TurnOrderMismatch,
    /// At most one participant may hold a win result
    MultipleWinners,
    /// Role inheritance edge would create a cycle
    RoleCycle,
    /// Requested transition is invalid for the pod's confirmation status
    InvalidState,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Pod not found
    PodNotFound,
    /// League not found
    LeagueNotFound,
    /// User not found
    UserNotFound,
    /// Participant not found
    ParticipantNotFound,
    /// Win condition not found
    WinConditionNotFound,
    /// Role not found
    RoleNotFound,
    /// General not found error
    NotFound,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// The canonical SCREAMING_SNAKE_CASE string for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            ErrorCode::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            ErrorCode::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",
            ErrorCode::InvalidPodId => "INVALID_POD_ID",
            ErrorCode::InvalidLeagueId => "INVALID_LEAGUE_ID",
            ErrorCode::PodFull => "POD_FULL",
            ErrorCode::AlreadyJoined => "ALREADY_JOINED",
            ErrorCode::AlreadyInOpenPod => "ALREADY_IN_OPEN_POD",
            ErrorCode::RosterSize => "ROSTER_SIZE",
            ErrorCode::DuplicatePlayers => "DUPLICATE_PLAYERS",
            ErrorCode::LeagueNotActive => "LEAGUE_NOT_ACTIVE",
            ErrorCode::WinnerNotInPod => "WINNER_NOT_IN_POD",
            ErrorCode::WinConditionRequired => "WIN_CONDITION_REQUIRED",
            ErrorCode::TurnOrderMismatch => "TURN_ORDER_MISMATCH",
            ErrorCode::MultipleWinners => "MULTIPLE_WINNERS",
            ErrorCode::RoleCycle => "ROLE_CYCLE",
            ErrorCode::InvalidState => "INVALID_STATE",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::PodNotFound => "POD_NOT_FOUND",
            ErrorCode::LeagueNotFound => "LEAGUE_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::ParticipantNotFound => "PARTICIPANT_NOT_FOUND",
            ErrorCode::WinConditionNotFound => "WIN_CONDITION_NOT_FOUND",
            ErrorCode::RoleNotFound => "ROLE_NOT_FOUND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::DbError => "DB_ERROR",
            ErrorCode::DbUnavailable => "DB_UNAVAILABLE",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::ErrorCode;

    const ALL: &[ErrorCode] = &[
        ErrorCode::Unauthorized,
        ErrorCode::UnauthorizedMissingBearer,
        ErrorCode::UnauthorizedInvalidJwt,
        ErrorCode::UnauthorizedExpiredJwt,
        ErrorCode::Forbidden,
        ErrorCode::ForbiddenUserNotFound,
        ErrorCode::InvalidPodId,
        ErrorCode::InvalidLeagueId,
        ErrorCode::PodFull,
        ErrorCode::AlreadyJoined,
        ErrorCode::AlreadyInOpenPod,
        ErrorCode::RosterSize,
        ErrorCode::DuplicatePlayers,
        ErrorCode::LeagueNotActive,
        ErrorCode::WinnerNotInPod,
        ErrorCode::WinConditionRequired,
        ErrorCode::TurnOrderMismatch,
        ErrorCode::MultipleWinners,
        ErrorCode::RoleCycle,
        ErrorCode::InvalidState,
        ErrorCode::ValidationError,
        ErrorCode::BadRequest,
        ErrorCode::PodNotFound,
        ErrorCode::LeagueNotFound,
        ErrorCode::UserNotFound,
        ErrorCode::ParticipantNotFound,
        ErrorCode::WinConditionNotFound,
        ErrorCode::RoleNotFound,
        ErrorCode::NotFound,
        ErrorCode::DbError,
        ErrorCode::DbUnavailable,
        ErrorCode::Internal,
        ErrorCode::ConfigError,
    ];

    #[test]
    fn codes_are_unique_and_screaming_snake() {
        let mut seen = HashSet::new();
        for code in ALL {
            let s = code.as_str();
            assert!(seen.insert(s), "duplicate error code string: {s}");
            assert!(
                s.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
                "not SCREAMING_SNAKE_CASE: {s}"
            );
        }
    }
}
