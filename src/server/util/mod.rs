//! Utility functions and helpers for server operations.
//!
//! This module provides reusable helpers shared by the validation pipeline, the repository
//! layer and the service layer: syntactic URL rules (scheme detection, default scheme,
//! hostname pattern, issue classification) and pagination bound clamping.

pub mod pagination;
pub mod url;
