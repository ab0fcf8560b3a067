//! Tests for HTTP controller endpoints.
//!
//! This module contains integration tests for the application's HTTP controllers, verifying
//! session-based actor resolution, status code mapping and response bodies.

mod source;

use chronicle_test_utils::prelude::*;
