//! Utility functions for controller request handling.
//!
//! This module provides reusable helpers used across controllers, such as resolving the acting
//! user from the session for endpoints that require one.

pub mod actor;
