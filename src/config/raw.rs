use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;

use super::defaults::{default_id_prefix, default_id_scheme};
use super::env::{VarSource, env_duration, env_string};
use super::{Config, DurationDefaults, HumanOrMillis, IdScheme, SchemeName};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawConfig, ConfigError> {
    let path = path.as_ref();
    let builder = ::config::Config::builder()
        .add_source(::config::File::from(path).required(false))
        .add_source(
            ::config::Environment::with_prefix("TOASTS")
                .separator("__")
                .try_parsing(true),
        );
    deserialize(builder)
}

pub(super) fn load_str(source: &str) -> std::result::Result<RawConfig, ConfigError> {
    let builder = ::config::Config::builder()
        .add_source(::config::File::from_str(source, ::config::FileFormat::Toml));
    deserialize(builder)
}

fn deserialize(
    builder: ::config::ConfigBuilder<::config::builder::DefaultState>,
) -> std::result::Result<RawConfig, ConfigError> {
    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) ids: RawIds,
    #[serde(default)]
    pub(super) durations: RawDurations,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawIds {
    #[serde(default = "default_id_scheme")]
    pub(super) scheme: String,
    #[serde(default = "default_id_prefix")]
    pub(super) prefix: String,
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub(super) struct RawDurations {
    #[serde(default)]
    #[serde_as(as = "Option<HumanOrMillis>")]
    pub(super) success: Option<Duration>,
    #[serde(default)]
    #[serde_as(as = "Option<HumanOrMillis>")]
    pub(super) error: Option<Duration>,
    #[serde(default)]
    #[serde_as(as = "Option<HumanOrMillis>")]
    pub(super) warning: Option<Duration>,
    #[serde(default)]
    #[serde_as(as = "Option<HumanOrMillis>")]
    pub(super) info: Option<Duration>,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(
        &mut self,
        vars: &impl VarSource,
    ) -> std::result::Result<(), ConfigError> {
        if let Some(scheme) = env_string(vars, "TOAST_ID_SCHEME")? {
            self.ids.scheme = scheme;
        }
        if let Some(prefix) = env_string(vars, "TOAST_ID_PREFIX")? {
            self.ids.prefix = prefix;
        }
        if let Some(duration) = env_duration(vars, "TOAST_DURATION_SUCCESS")? {
            self.durations.success = Some(duration);
        }
        if let Some(duration) = env_duration(vars, "TOAST_DURATION_ERROR")? {
            self.durations.error = Some(duration);
        }
        if let Some(duration) = env_duration(vars, "TOAST_DURATION_WARNING")? {
            self.durations.warning = Some(duration);
        }
        if let Some(duration) = env_duration(vars, "TOAST_DURATION_INFO")? {
            self.durations.info = Some(duration);
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        let scheme = SchemeName::from_str(&self.ids.scheme).map_err(|message| {
            ConfigError::InvalidField {
                field: "ids.scheme",
                message,
            }
        })?;
        let ids = match scheme {
            SchemeName::Uuid => IdScheme::Uuid,
            SchemeName::Sequential => {
                let prefix = self.ids.prefix.trim();
                if prefix.is_empty() {
                    return Err(ConfigError::InvalidField {
                        field: "ids.prefix",
                        message: "prefix cannot be empty".to_string(),
                    }
                    .into());
                }
                IdScheme::Sequential {
                    prefix: prefix.to_string(),
                }
            }
        };

        let durations = DurationDefaults {
            success: non_zero("durations.success", self.durations.success)?,
            error: non_zero("durations.error", self.durations.error)?,
            warning: non_zero("durations.warning", self.durations.warning)?,
            info: non_zero("durations.info", self.durations.info)?,
        };

        Ok(Config { ids, durations })
    }
}

fn non_zero(
    field: &'static str,
    value: Option<Duration>,
) -> std::result::Result<Option<Duration>, ConfigError> {
    match value {
        Some(duration) if duration.is_zero() => Err(ConfigError::InvalidField {
            field,
            message: "duration must be greater than zero".to_string(),
        }),
        other => Ok(other),
    }
}

impl Default for RawIds {
    fn default() -> Self {
        Self {
            scheme: default_id_scheme(),
            prefix: default_id_prefix(),
        }
    }
}
