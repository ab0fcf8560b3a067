use crate::server::{
    error::config::{ConfigError, RoleLevelIssue},
    service::moderation::ModerationPolicy,
};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

const REQUESTER_LEVEL_VAR: &str = "REQUESTER_ROLE_LEVEL";
const MODERATOR_LEVEL_VAR: &str = "MODERATOR_ROLE_LEVEL";
const ADMIN_LEVEL_VAR: &str = "ADMIN_ROLE_LEVEL";

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub bind_address: String,
    /// Role thresholds for direct writes, change requests and admin audits
    pub policy: ModerationPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source
    ///
    /// # Returns
    /// - `Ok(Config)`: All required variables present and role levels valid
    /// - `Err(ConfigError::MissingEnvVar)`: `DATABASE_URL` or `VALKEY_URL` is unset
    /// - `Err(ConfigError::InvalidEnvValue)`: A role level is not an integer, or the levels decrease
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required =
            |var: &'static str| lookup(var).ok_or(ConfigError::MissingEnvVar(var));

        let defaults = ModerationPolicy::default();
        let requester_level = role_level(&lookup, REQUESTER_LEVEL_VAR, defaults.requester_level)?;
        let moderator_level = role_level(&lookup, MODERATOR_LEVEL_VAR, defaults.moderator_level)?;
        let admin_level = role_level(&lookup, ADMIN_LEVEL_VAR, defaults.admin_level)?;

        ensure_not_below(MODERATOR_LEVEL_VAR, moderator_level, REQUESTER_LEVEL_VAR, requester_level)?;
        ensure_not_below(ADMIN_LEVEL_VAR, admin_level, MODERATOR_LEVEL_VAR, moderator_level)?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            policy: ModerationPolicy {
                requester_level,
                moderator_level,
                admin_level,
            },
        })
    }
}

fn role_level<F>(lookup: &F, var: &'static str, default: i32) -> Result<i32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };

    raw.trim()
        .parse::<i32>()
        .map_err(|e| ConfigError::InvalidEnvValue {
            var,
            value: raw.clone(),
            reason: RoleLevelIssue::from(e),
        })
}

fn ensure_not_below(
    var: &'static str,
    level: i32,
    lower_var: &'static str,
    lower: i32,
) -> Result<(), ConfigError> {
    if level < lower {
        return Err(ConfigError::InvalidEnvValue {
            var,
            value: level.to_string(),
            reason: RoleLevelIssue::BelowLowerLevel { lower_var, lower },
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |key| vars.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/chronicle"),
        ("VALKEY_URL", "redis://localhost:6379"),
    ];

    /// Expect defaults for bind address and role levels when only required vars are set
    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.policy, ModerationPolicy::default());
    }

    /// Expect custom role levels to be parsed
    #[test]
    fn reads_role_levels() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("REQUESTER_ROLE_LEVEL", "10"),
            ("MODERATOR_ROLE_LEVEL", " 20 "),
            ("ADMIN_ROLE_LEVEL", "20"),
            ("BIND_ADDRESS", "127.0.0.1:3000"),
        ]);

        let config = Config::from_lookup(lookup_from(&vars)).unwrap();

        assert_eq!(config.policy.requester_level, 10);
        assert_eq!(config.policy.moderator_level, 20);
        assert_eq!(config.policy.admin_level, 20);
        assert_eq!(config.bind_address, "127.0.0.1:3000");
    }

    /// Expect MissingEnvVar naming the absent variable
    #[test]
    fn fails_without_database_url() {
        let result = Config::from_lookup(lookup_from(&[("VALKEY_URL", "redis://localhost")]));

        assert!(matches!(result, Err(ConfigError::MissingEnvVar("DATABASE_URL"))));
    }

    /// Expect InvalidEnvValue carrying the raw value for a non-numeric role level
    #[test]
    fn rejects_non_numeric_level() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("ADMIN_ROLE_LEVEL", "admin"));

        let result = Config::from_lookup(lookup_from(&vars));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvValue {
                var: "ADMIN_ROLE_LEVEL",
                ref value,
                reason: RoleLevelIssue::NotAnInteger(_),
            }) if value == "admin"
        ));
    }

    /// Expect InvalidEnvValue when moderator level is below requester level
    #[test]
    fn rejects_decreasing_levels() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([("REQUESTER_ROLE_LEVEL", "3"), ("MODERATOR_ROLE_LEVEL", "2")]);

        let result = Config::from_lookup(lookup_from(&vars));

        assert_eq!(
            result.err(),
            Some(ConfigError::InvalidEnvValue {
                var: "MODERATOR_ROLE_LEVEL",
                value: "2".to_string(),
                reason: RoleLevelIssue::BelowLowerLevel {
                    lower_var: "REQUESTER_ROLE_LEVEL",
                    lower: 3,
                },
            })
        );
    }
}
