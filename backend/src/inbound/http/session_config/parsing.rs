//! Environment parsing helpers for session configuration.

use chrono::Duration;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const HOURS_EXPECTED: &str = "a positive number of hours";

/// Configuration for parsing a boolean environment variable.
pub(super) struct BoolEnvConfig {
    name: &'static str,
    default_value: bool,
}

impl BoolEnvConfig {
    pub(super) const fn new(name: &'static str, default_value: bool) -> Self {
        Self {
            name,
            default_value,
        }
    }
}

/// Parse a boolean toggle. Missing values take the default in every mode;
/// unparsable values fall back in debug builds and fail in release builds.
pub(super) fn parse_bool_env<E: Env, F>(
    env: &E,
    mode: BuildMode,
    config: BoolEnvConfig,
    value_validator: F,
) -> Result<bool, SessionConfigError>
where
    F: FnOnce(bool, BuildMode) -> Result<bool, SessionConfigError>,
{
    let Some(value) = env.string(config.name) else {
        return Ok(config.default_value);
    };
    match parse_bool(&value) {
        Some(flag) => value_validator(flag, mode),
        None => debug_warn_or_error(
            mode,
            config.default_value,
            SessionConfigError::InvalidEnv {
                name: config.name,
                value: value.clone(),
                expected: BOOL_EXPECTED,
            },
            || warn!(value = %value, "invalid {}; using default", config.name),
        ),
    }
}

/// Parse a token lifetime expressed in whole hours.
pub(super) fn parse_ttl_hours<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    default_hours: i64,
) -> Result<Duration, SessionConfigError> {
    let Some(value) = env.string(name) else {
        return Ok(Duration::hours(default_hours));
    };
    match value.trim().parse::<u32>() {
        Ok(hours) if hours > 0 => Ok(Duration::hours(i64::from(hours))),
        _ => debug_warn_or_error(
            mode,
            Duration::hours(default_hours),
            SessionConfigError::InvalidEnv {
                name,
                value: value.clone(),
                expected: HOURS_EXPECTED,
            },
            || warn!(value = %value, "invalid {name}; using default"),
        ),
    }
}

pub(super) fn debug_warn_or_error<T, F>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: F,
) -> Result<T, SessionConfigError>
where
    F: FnOnce(),
{
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
