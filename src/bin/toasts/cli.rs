use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::{ArgAction, Parser};
use humantime::parse_duration;
use toasts::{ToastInput, ToastKind};

#[derive(Parser, Debug)]
#[command(author, version, about = "Show transient toasts on the console", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Toast to show, as `kind:title[:message[:duration]]`. Repeatable.
    /// Escape a literal colon as `\:`; durations need a unit ("5s", "1500ms").
    #[arg(long = "toast", value_name = "SPEC", value_parser = parse_toast_spec)]
    pub toasts: Vec<ToastInput>,

    /// Give up waiting for auto-dismissal after this long (e.g. "30s").
    #[arg(long, value_parser = parse_duration, default_value = "30s")]
    pub max_wait: Duration,

    /// Do not display anything, only log what would be shown.
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Emit JSON logs (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (e.g. "toasts=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Parses `kind:title[:message[:duration]]`.
///
/// `\:` is a literal colon and `\\` a literal backslash. The trailing segment
/// is a duration only when it parses as one with a unit (`5s`, `1500ms`);
/// otherwise it stays part of the message, so `Starts at 10:30` survives.
fn parse_toast_spec(spec: &str) -> Result<ToastInput, String> {
    let segments = split_unescaped(spec);
    let (kind, rest) = segments
        .split_first()
        .ok_or_else(|| "missing toast kind".to_string())?;
    let kind = ToastKind::from_str(kind)?;
    let (title, rest) = rest
        .split_first()
        .ok_or_else(|| format!("missing title in toast spec `{spec}`"))?;

    let (message_parts, duration) = match rest.split_last() {
        Some((last, head)) if !head.is_empty() => match last.trim() {
            "" => (head, None),
            raw => match parse_duration(raw) {
                Ok(duration) => (head, Some(duration)),
                Err(_) => (rest, None),
            },
        },
        _ => (rest, None),
    };

    let mut input = ToastInput::new(kind, title.as_str());
    let message = message_parts.join(":");
    if !message.is_empty() {
        input = input.message(message);
    }
    if let Some(duration) = duration {
        input = input.duration(duration);
    }
    Ok(input)
}

fn split_unescaped(spec: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = spec.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next @ (':' | '\\')) => current.push(next),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            ':' => segments.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    segments.push(current);
    segments
}

#[cfg(test)]
mod tests {
    use super::parse_toast_spec;
    use std::time::Duration;
    use toasts::ToastKind;

    #[test]
    fn spec_with_title_only() {
        let input = parse_toast_spec("success:Saved").unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(input.kind, ToastKind::Success);
        assert_eq!(input.title, "Saved");
        assert!(input.message.is_none());
        assert!(input.duration.is_none());
    }

    #[test]
    fn spec_with_all_fields() {
        let input = parse_toast_spec("err:Failed:Network error:5000ms")
            .unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(input.kind, ToastKind::Error);
        assert_eq!(input.message.as_deref(), Some("Network error"));
        assert_eq!(input.duration, Some(Duration::from_millis(5_000)));
    }

    #[test]
    fn spec_accepts_humantime_and_empty_message() {
        let input = parse_toast_spec("warn:Low battery::2s").unwrap_or_else(|err| panic!("{err}"));
        assert!(input.message.is_none());
        assert_eq!(input.duration, Some(Duration::from_secs(2)));
    }

    #[test]
    fn colon_in_message_is_not_taken_for_a_duration() {
        let input = parse_toast_spec("info:Meeting:Starts at 10:30")
            .unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(input.title, "Meeting");
        assert_eq!(input.message.as_deref(), Some("Starts at 10:30"));
        assert!(input.duration.is_none());
    }

    #[test]
    fn message_with_colon_keeps_trailing_duration() {
        let input = parse_toast_spec("info:Meeting:Starts at 10:30:2s")
            .unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(input.message.as_deref(), Some("Starts at 10:30"));
        assert_eq!(input.duration, Some(Duration::from_secs(2)));
    }

    #[test]
    fn escaped_colons_are_literal() {
        let input = parse_toast_spec(r"info:Build\:ok:took 5s\:")
            .unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(input.title, "Build:ok");
        assert_eq!(input.message.as_deref(), Some("took 5s:"));
        assert!(input.duration.is_none());

        let input = parse_toast_spec(r"info:Path:C\\temp\:5s")
            .unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(input.message.as_deref(), Some(r"C\temp:5s"));
        assert!(input.duration.is_none());
    }

    #[test]
    fn unparsable_trailing_segment_stays_in_message() {
        let input = parse_toast_spec("info:Hi::whenever").unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(input.message.as_deref(), Some(":whenever"));
        assert!(input.duration.is_none());
    }

    #[test]
    fn spec_rejects_bad_input() {
        assert!(parse_toast_spec("loud:Hi").is_err());
        assert!(parse_toast_spec("info").is_err());
    }
}
