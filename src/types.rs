use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// Which built-in decoder turns stdout chunks into records.
///
/// - `Plain`: one record per line, the line text in `message`.
/// - `Json`: one record per JSON object line, its keys become record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderKind {
    Plain,
    Json,
}

impl Default for DecoderKind {
    fn default() -> Self {
        DecoderKind::Plain
    }
}

impl FromStr for DecoderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(DecoderKind::Plain),
            "json" => Ok(DecoderKind::Json),
            other => Err(format!(
                "invalid decoder: {other} (expected \"plain\" or \"json\")"
            )),
        }
    }
}

impl std::fmt::Display for DecoderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecoderKind::Plain => f.write_str("plain"),
            DecoderKind::Json => f.write_str("json"),
        }
    }
}

/// `interval` as written in the config: either a number of seconds
/// (`interval = 5`, `interval = 0.5`) or a duration string
/// (`interval = "250ms"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IntervalSetting {
    Seconds(f64),
    Text(String),
}

impl IntervalSetting {
    /// Resolve to a strictly positive `Duration`.
    pub fn to_duration(&self) -> Result<Duration, String> {
        match self {
            IntervalSetting::Seconds(secs) => seconds_to_duration(*secs),
            IntervalSetting::Text(s) => parse_duration(s),
        }
    }
}

impl FromStr for IntervalSetting {
    type Err = String;

    /// CLI form: bare numbers are seconds, anything else is a duration string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.parse::<f64>() {
            Ok(secs) => Ok(IntervalSetting::Seconds(secs)),
            Err(_) => Ok(IntervalSetting::Text(s.to_string())),
        }
    }
}

fn seconds_to_duration(secs: f64) -> Result<Duration, String> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("interval must be a positive number of seconds (got {secs})"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("interval {secs} is out of range: {e}"))
}

/// Parse a simple duration string like `"3s"`, `"250ms"`, `"1m"`, `"2h"`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Find the boundary between digits and suffix.
    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    let secs_per_unit = |per: u64| {
        value
            .checked_mul(per)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("duration '{s}' is out of range"))
    };

    let dur = match unit.as_str() {
        "ms" => Duration::from_millis(value),
        "s" => Duration::from_secs(value),
        "m" => secs_per_unit(60)?,
        "h" => secs_per_unit(60 * 60)?,
        _ => {
            return Err(format!(
                "unsupported duration unit '{}'; expected ms, s, m, or h",
                unit
            ));
        }
    };

    if dur.is_zero() {
        return Err(format!("duration '{s}' must be greater than zero"));
    }
    Ok(dur)
}
