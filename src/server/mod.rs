//! Server application core modules.
//!
//! This module contains the server side of Chronicle: HTTP routing, session-based actor
//! resolution, the moderation-aware source service, and its SeaORM repositories.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
