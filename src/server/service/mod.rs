//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP controllers and the repositories. [`moderation`] decides what
//! an actor's role level permits, and [`source`] applies that decision together with input
//! validation and audit logging to every source operation.

pub mod moderation;
pub mod source;
