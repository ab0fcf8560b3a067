//! HTTP controller endpoints for the Chronicle web API.
//!
//! This module contains Axum handlers for browsing, editing and auditing sources. Controllers
//! resolve the acting user from the session, hand the request to the source service and map
//! results to DTOs. They integrate with tower-sessions for session management and use utoipa
//! for OpenAPI documentation.

pub mod source;
pub mod util;
