pub use super::app_user::Entity as AppUser;
pub use super::audit_log::Entity as AuditLog;
pub use super::event::Entity as Event;
pub use super::source::Entity as Source;
pub use super::source_change_request::Entity as SourceChangeRequest;
pub use super::source_event::Entity as SourceEvent;
