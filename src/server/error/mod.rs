//! Error types for the Chronicle server application.
//!
//! This module provides the error handling system for the source service with specialized
//! error types for each failure domain (input validation, access control, missing entities,
//! configuration). All errors implement `IntoResponse` for Axum HTTP responses and use
//! `thiserror` for `Display` and `Error` implementations.

pub mod access;
pub mod config;
pub mod entity;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        access::AccessError, config::ConfigError, entity::EntityError, validation::ValidationError,
    },
};

/// Main error type for the Chronicle server application.
///
/// Aggregates the domain-specific error types and external library errors into a single
/// error type. `#[from]` conversions let the `?` operator lift repository, validation and
/// policy failures without manual mapping. The `IntoResponse` implementation maps each
/// category to a specific HTTP status so callers can render an actionable message.
///
/// # Error Categories
/// - Validation errors (field rules, query bounds)
/// - Access errors (missing session, insufficient role level)
/// - Entity errors (referenced source or event does not exist)
/// - Configuration errors (missing/invalid environment variables)
/// - External library errors (database, sessions)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Input failed a field-level rule.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Actor is not allowed to perform the operation.
    #[error(transparent)]
    AccessError(#[from] AccessError),
    /// Referenced entity does not exist.
    #[error(transparent)]
    EntityError(#[from] EntityError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// I/O error while binding or serving the HTTP listener.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Validation failures
/// - 401 Unauthorized - No user in session
/// - 403 Forbidden - Role level below the operation's threshold
/// - 404 Not Found - Missing source or event
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ValidationError(err) => err.into_response(),
            Self::AccessError(err) => err.into_response(),
            Self::EntityError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details. Used as a fallback for errors that don't
/// have specific HTTP response mappings.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
