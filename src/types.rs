use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of a toast, used by the display layer to pick styling.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub const ALL: [Self; 4] = [Self::Success, Self::Error, Self::Warning, Self::Info];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ToastKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" | "ok" => Ok(Self::Success),
            "error" | "err" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "info" | "information" => Ok(Self::Info),
            other => Err(format!("unknown toast kind: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ToastKind;
    use std::str::FromStr;

    #[test]
    fn kind_from_str_accepts_aliases() {
        assert_eq!(ToastKind::from_str("OK"), Ok(ToastKind::Success));
        assert_eq!(ToastKind::from_str("err"), Ok(ToastKind::Error));
        assert_eq!(ToastKind::from_str(" Warn "), Ok(ToastKind::Warning));
        assert_eq!(ToastKind::from_str("information"), Ok(ToastKind::Info));
        assert!(ToastKind::from_str("fatal").is_err());
    }

    #[test]
    fn kind_display_matches_serde_name() {
        for kind in ToastKind::ALL {
            let json = match serde_json::to_string(&kind) {
                Ok(value) => value,
                Err(err) => panic!("failed to serialise kind: {err}"),
            };
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
