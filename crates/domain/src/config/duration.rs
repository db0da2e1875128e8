use std::time::Duration;

use super::errors::ConfigError;

const UNITS: [(&str, f64); 8] = [
    ("ns", 1.0),
    ("us", 1_000.0),
    ("µs", 1_000.0),
    ("μs", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60_000_000_000.0),
    ("h", 3_600_000_000_000.0),
];

/// Parses a duration string such as `300ms`, `2s` or `1m30s`.
///
/// Accepts a sequence of decimal numbers, each with an optional fraction and
/// a mandatory unit (`ns`, `us`/`µs`, `ms`, `s`, `m`, `h`). A bare `0` is
/// also accepted.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidDuration(input.to_string(), reason.to_string());

    let s = input.trim();
    if s.is_empty() {
        return Err(invalid("empty duration"));
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.starts_with('-') {
        return Err(invalid("negative durations are not allowed"));
    }

    let mut rest = s.strip_prefix('+').unwrap_or(s);
    let mut total_nanos = 0f64;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(invalid("expected a number"));
        }
        let value: f64 = rest[..number_len]
            .parse()
            .map_err(|_| invalid("malformed number"))?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(invalid("missing unit"));
        }
        let unit = &rest[..unit_len];
        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(|| invalid(&format!("unknown unit '{}'", unit)))?;
        rest = &rest[unit_len..];

        total_nanos += value * scale;
    }

    if !total_nanos.is_finite() || total_nanos > u64::MAX as f64 {
        return Err(invalid("duration out of range"));
    }

    Ok(Duration::from_nanos(total_nanos.round() as u64))
}
