//! SeaORM entity definitions for the Chronicle source database.

pub mod prelude;

pub mod app_user;
pub mod audit_log;
pub mod event;
pub mod source;
pub mod source_change_request;
pub mod source_event;
