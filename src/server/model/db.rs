//! Database model type aliases.
//!
//! This module provides convenient type aliases for SeaORM database entity models used
//! throughout the application. These aliases simplify type signatures and provide a single
//! point of reference for database model types, making it easier to work with entities
//! without importing from the `entity` crate directly.

/// Type alias for source database model.
///
/// # Fields (from `entity::source::Model`)
/// - `id` - Primary key, storage-assigned source identifier
/// - `name` - Trimmed source name, 3 to 200 characters
/// - `author` - Optional author, at most 100 characters
/// - `source_type` - Optional free-text type such as "book" or "article"
/// - `publication_date` - Optional publication date, never in the future when written
/// - `url` - Optional URL, always stored with a recognized scheme
/// - `created_at` - Timestamp when the source was created
/// - `updated_at` - Timestamp of the last direct update
pub type SourceModel = entity::source::Model;

/// Type alias for event database model.
pub type EventModel = entity::event::Model;

/// Type alias for the source/event link model.
pub type SourceEventModel = entity::source_event::Model;

/// Type alias for a pending change request.
///
/// # Fields (from `entity::source_change_request::Model`)
/// - `id` - Primary key
/// - `kind` - `create`, `update` or `delete`
/// - `source_id` - Target source for `update`/`delete`
/// - `requester_id` - User who submitted the request
/// - `name`, `author`, `source_type`, `publication_date`, `url` - Proposed field values
/// - `reason` - Optional reason given for a delete request
/// - `status` - Always `pending` when written by this service
/// - `created_at` - Timestamp when the request was submitted
pub type ChangeRequestModel = entity::source_change_request::Model;

/// Type alias for audit log database model.
pub type AuditLogModel = entity::audit_log::Model;

/// Type alias for application user database model (role lookup only).
pub type AppUserModel = entity::app_user::Model;
