use std::num::ParseIntError;

use thiserror::Error;

/// Startup configuration failures.
///
/// Raised by [`Config::from_env`](crate::server::config::Config::from_env) before the listener
/// binds, so they surface through `main` rather than as HTTP responses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid value {value:?} for environment variable {var}: {reason}")]
    InvalidEnvValue {
        var: &'static str,
        value: String,
        reason: RoleLevelIssue,
    },
}

/// Why a role level variable was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleLevelIssue {
    #[error("not an integer ({0})")]
    NotAnInteger(#[from] ParseIntError),
    /// Levels must be non-decreasing from requester to moderator to admin
    #[error("must be at least {lower_var} ({lower})")]
    BelowLowerLevel { lower_var: &'static str, lower: i32 },
}
