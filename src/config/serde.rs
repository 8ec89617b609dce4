use std::time::Duration;

use humantime::parse_duration;
use serde::Deserialize;
use serde_with::DeserializeAs;

/// Accepts either a humantime string (`"3s"`, `"1500ms"`) or a bare number of
/// milliseconds, the unit toast durations are expressed in.
pub(super) struct HumanOrMillis;

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Millis(u64),
    Text(String),
}

impl<'de> DeserializeAs<'de, Duration> for HumanOrMillis {
    fn deserialize_as<D>(deserializer: D) -> std::result::Result<Duration, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Millis(ms) => Ok(Duration::from_millis(ms)),
            Repr::Text(raw) => parse_duration(raw.trim()).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HumanOrMillis;
    use serde::Deserialize;
    use serde_with::serde_as;
    use std::time::Duration;

    #[serde_as]
    #[derive(Deserialize)]
    struct Hint {
        #[serde_as(as = "Option<HumanOrMillis>")]
        #[serde(default)]
        duration: Option<Duration>,
    }

    fn parse(json: &str) -> Hint {
        match serde_json::from_str(json) {
            Ok(value) => value,
            Err(err) => panic!("failed to parse hint {json}: {err}"),
        }
    }

    #[test]
    fn accepts_humantime_strings() {
        assert_eq!(parse(r#"{"duration":"5s"}"#).duration, Some(Duration::from_secs(5)));
    }

    #[test]
    fn accepts_bare_milliseconds() {
        assert_eq!(parse(r#"{"duration":1500}"#).duration, Some(Duration::from_millis(1_500)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Hint>(r#"{"duration":"soon"}"#).is_err());
    }
}
