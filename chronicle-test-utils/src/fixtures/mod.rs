//! Test fixture modules for database record creation.
//!
//! Each submodule provides fixtures for one part of the schema:
//!
//! - `user` - Application users with role levels
//! - `source` - Source records
//! - `event` - Events and source/event links
//! - `factory` - In-memory models that don't touch the database
//! - `role` - Role levels matching the default moderation policy

pub mod event;
pub mod factory;
pub mod role;
pub mod source;
pub mod user;
