use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("User ID is not present in session")]
    NotLoggedIn,
    /// The session holds an actor ID that is not a valid user ID
    #[error("Session actor ID {0:?} is not a valid user ID")]
    MalformedSessionActor(String),
    #[error("User ID {actor_id} has role level {actual} but level {required} is required")]
    PermissionDenied {
        actor_id: i32,
        required: i32,
        actual: i32,
    },
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        match self {
            Self::NotLoggedIn => {
                tracing::debug!("{}", self);

                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorDto {
                        error: "You must be logged in to do that.".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::MalformedSessionActor(_) => {
                tracing::warn!("{}", self);

                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorDto {
                        error: "Your session is invalid, please log in again.".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::PermissionDenied { actor_id, .. } => {
                tracing::debug!(actor_id = %actor_id, "{}", self);

                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorDto {
                        error: "You do not have permission to do that.".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
