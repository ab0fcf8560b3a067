//! Database model type aliases for test utilities.
//!
//! These aliases match those in the main chronicle crate to keep fixture signatures readable.

/// Type alias for source database model.
pub type SourceModel = entity::source::Model;

/// Type alias for event database model.
pub type EventModel = entity::event::Model;

/// Type alias for the source/event link model.
pub type SourceEventModel = entity::source_event::Model;

/// Type alias for application user database model.
pub type AppUserModel = entity::app_user::Model;

/// Type alias for pending change request database model.
pub type ChangeRequestModel = entity::source_change_request::Model;

/// Type alias for audit log database model.
pub type AuditLogModel = entity::audit_log::Model;
