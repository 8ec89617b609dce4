use std::fmt::{self, Display};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::Result;
use crate::error::Error as ToastError;
use crate::types::ToastKind;

mod defaults;
mod env;
mod raw;
mod serde;

use self::serde::HumanOrMillis;

/// Settings that shape how a [`crate::ToastManager`] creates toasts.
///
/// The default configuration (random ids, no duration defaults) leaves every
/// toast exactly as the caller described it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub ids: IdScheme,
    pub durations: DurationDefaults,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdScheme {
    #[default]
    Uuid,
    Sequential {
        prefix: String,
    },
}

impl IdScheme {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Sequential { .. } => "sequential",
        }
    }
}

impl Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of an id scheme, before its parameters are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SchemeName {
    Uuid,
    Sequential,
}

impl FromStr for SchemeName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uuid" | "random" => Ok(Self::Uuid),
            "sequential" | "seq" | "counter" => Ok(Self::Sequential),
            other => Err(format!("unknown id scheme: {other}")),
        }
    }
}

/// Per-kind duration hints applied when a caller does not pass one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationDefaults {
    pub success: Option<Duration>,
    pub error: Option<Duration>,
    pub warning: Option<Duration>,
    pub info: Option<Duration>,
}

impl DurationDefaults {
    #[must_use]
    pub const fn get(&self, kind: ToastKind) -> Option<Duration> {
        match kind {
            ToastKind::Success => self.success,
            ToastKind::Error => self.error,
            ToastKind::Warning => self.warning,
            ToastKind::Info => self.info,
        }
    }
}

impl Config {
    /// Load configuration from an optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be parsed, when environment
    /// overrides are invalid, or when the resulting values fail validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(ToastError::from)?;
        raw.apply_env_overrides(&env::ProcessEnv).map_err(ToastError::from)?;
        raw.validate_and_build()
    }

    /// Parse a TOML document, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is malformed or fails validation.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        raw::load_str(source)
            .map_err(ToastError::from)?
            .validate_and_build()
    }
}
