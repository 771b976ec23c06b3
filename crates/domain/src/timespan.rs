//! Time-span literals as stored in connection strings.
//!
//! Accepted forms (surrounding whitespace ignored):
//!
//! ```text
//! d
//! [d.]hh:mm
//! [d.]hh:mm:ss[.fffffff]
//! d:hh:mm:ss[.fffffff]
//! ```
//!
//! Hours must be below 24, minutes and seconds below 60, and the fraction
//! carries one to seven digits (100ns ticks). Negative spans are rejected
//! because `Duration` cannot hold them.

use std::time::Duration;

const SECONDS_PER_DAY: u64 = 86_400;
const NANOS_PER_TICK: u32 = 100;
const MAX_FRACTION_DIGITS: usize = 7;

/// Parse a time-span literal.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use xrm_connection_domain::parse_timespan;
///
/// assert_eq!(parse_timespan("00:02:00"), Some(Duration::from_secs(120)));
/// assert_eq!(parse_timespan("1.00:00:30"), Some(Duration::from_secs(86_430)));
/// assert_eq!(parse_timespan("two minutes"), None);
/// ```
pub fn parse_timespan(input: &str) -> Option<Duration> {
    let input = input.trim();
    if !input.contains(':') {
        let days = parse_digits(input)?;
        return days.checked_mul(SECONDS_PER_DAY).map(Duration::from_secs);
    }

    let (main, fraction) = split_fraction(input)?;
    let (day_prefix, clock) = split_day_prefix(main)?;
    let parts: Vec<&str> = clock.split(':').collect();

    let (days, hours, minutes, seconds) = match (day_prefix, parts.as_slice()) {
        (days, [hours, minutes]) if fraction.is_none() => (days, *hours, *minutes, "0"),
        (days, [hours, minutes, seconds]) => (days, *hours, *minutes, *seconds),
        (None, [days, hours, minutes, seconds]) => (Some(*days), *hours, *minutes, *seconds),
        _ => return None,
    };

    let days = days.map_or(Some(0), parse_digits)?;
    let hours = bounded(hours, 24)?;
    let minutes = bounded(minutes, 60)?;
    let seconds = bounded(seconds, 60)?;
    let nanos = fraction.map_or(Some(0), parse_fraction)?;

    let total = days
        .checked_mul(SECONDS_PER_DAY)?
        .checked_add(hours * 3_600 + minutes * 60 + seconds)?;
    Some(Duration::new(total, nanos))
}

/// Format a duration in the constant `[d.]hh:mm:ss[.fffffff]` form.
///
/// Precision below 100ns is truncated.
#[must_use]
pub fn format_timespan(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / SECONDS_PER_DAY;
    let hours = (total % SECONDS_PER_DAY) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    let ticks = duration.subsec_nanos() / NANOS_PER_TICK;

    let mut text = String::new();
    if days > 0 {
        text.push_str(&format!("{days}."));
    }
    text.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if ticks > 0 {
        text.push_str(&format!(".{ticks:07}"));
    }
    text
}

/// Split `main.fraction`, where the fraction dot follows the last colon.
fn split_fraction(input: &str) -> Option<(&str, Option<&str>)> {
    let last_colon = input.rfind(':')?;
    let tail = input.get(last_colon..)?;
    match tail.find('.') {
        Some(offset) => {
            let dot = last_colon + offset;
            Some((input.get(..dot)?, Some(input.get(dot + 1..)?)))
        },
        None => Some((input, None)),
    }
}

/// Split `days.clock`, where the day dot precedes the first colon.
fn split_day_prefix(main: &str) -> Option<(Option<&str>, &str)> {
    let first_colon = main.find(':')?;
    let head = main.get(..first_colon)?;
    match head.find('.') {
        Some(dot) => Some((Some(main.get(..dot)?), main.get(dot + 1..)?)),
        None => Some((None, main)),
    }
}

fn parse_digits(input: &str) -> Option<u64> {
    if input.is_empty() || !input.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

fn bounded(input: &str, limit: u64) -> Option<u64> {
    parse_digits(input).filter(|value| *value < limit)
}

fn parse_fraction(input: &str) -> Option<u32> {
    if input.len() > MAX_FRACTION_DIGITS {
        return None;
    }
    let digits = u32::try_from(parse_digits(input)?).ok()?;
    let scale = MAX_FRACTION_DIGITS - input.len();
    let ticks = digits * 10_u32.pow(u32::try_from(scale).ok()?);
    Some(ticks * NANOS_PER_TICK)
}
