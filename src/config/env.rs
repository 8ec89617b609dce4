use std::env::VarError;
use std::time::Duration;

use humantime::parse_duration;

use crate::error::ConfigError;

/// Where override variables are read from.
pub(super) trait VarSource {
    fn var(&self, key: &str) -> std::result::Result<String, VarError>;
}

/// The process environment.
pub(super) struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn var(&self, key: &str) -> std::result::Result<String, VarError> {
        std::env::var(key)
    }
}

pub(super) fn env_string(
    vars: &impl VarSource,
    key: &'static str,
) -> std::result::Result<Option<String>, ConfigError> {
    match vars.var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(ConfigError::Other(err.to_string())),
    }
}

pub(super) fn env_duration(
    vars: &impl VarSource,
    key: &'static str,
) -> std::result::Result<Option<Duration>, ConfigError> {
    if let Some(value) = env_string(vars, key)? {
        if value.trim().is_empty() {
            return Ok(None);
        }
        return parse_duration(value.trim())
            .map(Some)
            .map_err(|err| ConfigError::InvalidField {
                field: key,
                message: err.to_string(),
            });
    }
    Ok(None)
}
