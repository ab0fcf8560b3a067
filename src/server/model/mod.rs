//! Server application models and type definitions.
//!
//! This module contains data models for the server application, including application state,
//! database model type aliases, session data structures, source query/result types and audit
//! entries. These models bridge the gap between database entities, the service layer and HTTP
//! handlers.

pub mod app;
pub mod audit;
pub mod db;
pub mod session;
pub mod source;
