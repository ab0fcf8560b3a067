use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Input rejected by a field-level rule.
///
/// Always recoverable by correcting the input; never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {0}")]
    MissingField(&'static str),
    #[error("Field {field} must be at least {min} characters long (got {actual})")]
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },
    #[error("Field {field} must be at most {max} characters long (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
    #[error("Publication date {0} is in the future")]
    FutureDate(NaiveDate),
    #[error("Year {0} is out of range")]
    InvalidYear(i32),
    #[error("Invalid year range: {from} is after {to}")]
    InvertedYearRange { from: i32, to: i32 },
    #[error("Search query must be at least {min} characters long")]
    QueryTooShort { min: usize },
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!("Validation error: {}", self);

        (
            StatusCode::BAD_REQUEST,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
