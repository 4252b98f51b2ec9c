use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// JSON error body returned by every failing endpoint.
#[derive(Serialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
    pub code: String,
    pub status: u16,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Invalid state: {detail}")]
    State { detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Unauthorized")]
    Unauthorized,
    #[error("UnauthorizedMissingBearer")]
    UnauthorizedMissingBearer,
    #[error("UnauthorizedInvalidJwt")]
    UnauthorizedInvalidJwt,
    #[error("UnauthorizedExpiredJwt")]
    UnauthorizedExpiredJwt,
    #[error("Forbidden: {detail}")]
    Forbidden { code: ErrorCode, detail: String },
    #[error("Forbidden: User not found")]
    ForbiddenUserNotFound,
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable")]
    DbUnavailable,
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// The stable error code surfaced in the response body.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::State { .. } => ErrorCode::InvalidState,
            AppError::NotFound { code, .. } => *code,
            AppError::Unauthorized => ErrorCode::Unauthorized,
            AppError::UnauthorizedMissingBearer => ErrorCode::UnauthorizedMissingBearer,
            AppError::UnauthorizedInvalidJwt => ErrorCode::UnauthorizedInvalidJwt,
            AppError::UnauthorizedExpiredJwt => ErrorCode::UnauthorizedExpiredJwt,
            AppError::Forbidden { code, .. } => *code,
            AppError::ForbiddenUserNotFound => ErrorCode::ForbiddenUserNotFound,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable => ErrorCode::DbUnavailable,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::State { detail } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Unauthorized => "Authentication required".to_string(),
            AppError::UnauthorizedMissingBearer => "Missing or malformed Bearer token".to_string(),
            AppError::UnauthorizedInvalidJwt => "Invalid JWT".to_string(),
            AppError::UnauthorizedExpiredJwt => "Token expired".to_string(),
            AppError::Forbidden { detail, .. } => detail.clone(),
            AppError::ForbiddenUserNotFound => "User not found in database".to_string(),
            AppError::Db { detail } => detail.clone(),
            AppError::DbUnavailable => "Database not configured".to_string(),
            AppError::Internal { detail } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::State { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized
            | AppError::UnauthorizedMissingBearer
            | AppError::UnauthorizedInvalidJwt
            | AppError::UnauthorizedExpiredJwt => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } | AppError::ForbiddenUserNotFound => StatusCode::FORBIDDEN,
            AppError::Db { .. }
            | AppError::DbUnavailable
            | AppError::Internal { .. }
            | AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn validation(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn state(detail: impl Into<String>) -> Self {
        Self::State {
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn forbidden(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Forbidden {
            code,
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn unauthorized_missing_bearer() -> Self {
        Self::UnauthorizedMissingBearer
    }

    pub fn unauthorized_invalid_jwt() -> Self {
        Self::UnauthorizedInvalidJwt
    }

    pub fn unauthorized_expired_jwt() -> Self {
        Self::UnauthorizedExpiredJwt
    }

    pub fn forbidden_user_not_found() -> Self {
        Self::ForbiddenUserNotFound
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::internal(format!("env var error: {e}"))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(format!("db error: {e}"))
    }
}

fn validation_code(kind: &ValidationKind) -> ErrorCode {
    match kind {
        ValidationKind::PodFull => ErrorCode::PodFull,
        ValidationKind::AlreadyJoined => ErrorCode::AlreadyJoined,
        ValidationKind::AlreadyInOpenPod => ErrorCode::AlreadyInOpenPod,
        ValidationKind::RosterSize => ErrorCode::RosterSize,
        ValidationKind::DuplicatePlayers => ErrorCode::DuplicatePlayers,
        ValidationKind::LeagueNotActive => ErrorCode::LeagueNotActive,
        ValidationKind::WinnerNotInPod => ErrorCode::WinnerNotInPod,
        ValidationKind::WinConditionRequired => ErrorCode::WinConditionRequired,
        ValidationKind::TurnOrderMismatch => ErrorCode::TurnOrderMismatch,
        ValidationKind::MultipleWinners => ErrorCode::MultipleWinners,
        ValidationKind::RoleCycle => ErrorCode::RoleCycle,
        ValidationKind::Other(_) => ErrorCode::ValidationError,
    }
}

fn not_found_code(kind: &NotFoundKind) -> ErrorCode {
    match kind {
        NotFoundKind::User => ErrorCode::UserNotFound,
        NotFoundKind::League => ErrorCode::LeagueNotFound,
        NotFoundKind::Pod => ErrorCode::PodNotFound,
        NotFoundKind::Participant => ErrorCode::ParticipantNotFound,
        NotFoundKind::WinCondition => ErrorCode::WinConditionNotFound,
        NotFoundKind::Role => ErrorCode::RoleNotFound,
        NotFoundKind::Other(_) => ErrorCode::NotFound,
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(kind, detail) => {
                AppError::validation(validation_code(&kind), detail)
            }
            DomainError::Eligibility(detail) => AppError::forbidden(ErrorCode::Forbidden, detail),
            DomainError::State(detail) => AppError::state(detail),
            DomainError::NotFound(kind, detail) => {
                AppError::not_found(not_found_code(&kind), detail)
            }
            DomainError::Infra(kind, detail) => AppError::db(format!("{kind:?}: {detail}")),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        let body = ErrorBody {
            error: self.detail(),
            code: self.code().to_string(),
            status: status.as_u16(),
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .insert_header(("x-trace-id", trace_id))
            .json(body)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::AppError;
    use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
    use crate::errors::ErrorCode;

    #[test]
    fn domain_validation_maps_to_400() {
        let err: AppError =
            DomainError::validation(ValidationKind::PodFull, "pod already holds 4 players").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), ErrorCode::PodFull);
    }

    #[test]
    fn domain_eligibility_maps_to_403() {
        let err: AppError = DomainError::eligibility("not enrolled").into();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn domain_state_maps_to_400() {
        let err: AppError = DomainError::state("pod is not pending").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), ErrorCode::InvalidState);
    }

    #[test]
    fn domain_not_found_maps_to_404() {
        let err: AppError = DomainError::not_found(NotFoundKind::Pod, "pod 7 not found").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), ErrorCode::PodNotFound);
    }

    #[test]
    fn auth_errors_map_to_401() {
        for err in [
            AppError::unauthorized(),
            AppError::unauthorized_missing_bearer(),
            AppError::unauthorized_invalid_jwt(),
            AppError::unauthorized_expired_jwt(),
        ] {
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
