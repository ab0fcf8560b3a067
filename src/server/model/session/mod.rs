//! Session data models and utilities.
//!
//! This module provides type-safe wrappers for session data storage and retrieval using
//! tower-sessions. The session store (Redis-backed) is shared with the host application,
//! whose login flow writes the user ID this service reads.

pub mod user;
