use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::response::{failure, CODE_BAD_REQUEST, CODE_NOT_FOUND, CODE_SERVER_ERROR};

/// Column guarded by a unique index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniqueField::Username => f.write_str("username"),
            UniqueField::Email => f.write_str("email"),
        }
    }
}

/// Failure coming out of the record store.
///
/// "No row" outcomes are `Option::None` / `false` on the store calls
/// themselves; this enum only carries actual storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated on {0}")]
    ConstraintViolation(UniqueField),
    #[error(transparent)]
    Database(sqlx::Error),
}

impl StoreError {
    /// Classify a sqlx error, pulling unique violations on the known
    /// constraints out of the generic database bucket.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                match db_err.constraint() {
                    Some("users_username_key") => {
                        return StoreError::ConstraintViolation(UniqueField::Username)
                    }
                    Some("users_email_key") => {
                        return StoreError::ConstraintViolation(UniqueField::Email)
                    }
                    _ => {}
                }
            }
        }
        StoreError::Database(err)
    }
}

/// Error taxonomy surfaced by the account service.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,
    #[error("{0} already in use")]
    AlreadyExists(UniqueField),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("password hashing failed")]
    PasswordHash(#[source] anyhow::Error),
    #[error("storage failure")]
    Store(#[source] StoreError),
}

impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        match err {
            // A constraint trip is the same conflict the pre-check reports,
            // whichever layer caught it first.
            StoreError::ConstraintViolation(field) => UserError::AlreadyExists(field),
            other => UserError::Store(other),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match self {
            UserError::NotFound => {
                failure(StatusCode::NOT_FOUND, CODE_NOT_FOUND, "user not found")
            }
            UserError::AlreadyExists(field) => {
                warn!(%field, "uniqueness conflict");
                failure(
                    StatusCode::BAD_REQUEST,
                    CODE_BAD_REQUEST,
                    format!("{field} already in use"),
                )
            }
            UserError::Validation(message) => {
                warn!(%message, "request rejected");
                failure(StatusCode::BAD_REQUEST, CODE_BAD_REQUEST, message)
            }
            UserError::PasswordHash(e) => {
                error!(error = %e, "password hashing failed");
                failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    CODE_SERVER_ERROR,
                    "internal server error",
                )
            }
            UserError::Store(e) => {
                error!(error = %e, "storage failure");
                failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    CODE_SERVER_ERROR,
                    "internal server error",
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violation_becomes_already_exists() {
        let err = UserError::from(StoreError::ConstraintViolation(UniqueField::Email));
        assert!(matches!(err, UserError::AlreadyExists(UniqueField::Email)));
    }

    #[test]
    fn row_not_found_stays_a_database_error() {
        // RowNotFound is not how "no row" is modeled; if it leaks out of a
        // store call it must stay in the generic bucket.
        let err = StoreError::from_sqlx(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(_)));
        assert!(matches!(UserError::from(err), UserError::Store(_)));
    }

    #[test]
    fn error_status_codes() {
        assert_eq!(
            UserError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            UserError::AlreadyExists(UniqueField::Username)
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UserError::Validation("page_size out of range".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UserError::Store(StoreError::Database(sqlx::Error::PoolTimedOut))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
