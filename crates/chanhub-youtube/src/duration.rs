//! ISO 8601 designator-duration parsing.
//!
//! Upstream encodes video lengths as designator durations (`PT4M13S`,
//! `P1DT2H`). Malformed values from upstream must never abort a page fetch,
//! so parse failures degrade to a zero duration instead of an error.

use std::time::Duration;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_WEEK: u64 = 7 * SECS_PER_DAY;

/// Parse an ISO 8601 designator duration, returning zero on any malformed
/// input (bad designator, missing `T` separator before time units, year or
/// month designators, fractional values).
pub fn parse_duration(raw: &str) -> Duration {
    parse(raw).unwrap_or(Duration::ZERO)
}

fn parse(raw: &str) -> Option<Duration> {
    let rest = raw.strip_prefix('P')?;

    let mut secs: u64 = 0;
    let mut in_time = false;
    let mut saw_unit = false;
    let mut saw_time_unit = false;
    let mut num = String::new();

    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            num.push(ch);
            continue;
        }
        if ch == 'T' {
            // Separator must not interrupt a value and must appear once.
            if in_time || !num.is_empty() {
                return None;
            }
            in_time = true;
            continue;
        }
        let value: u64 = num.parse().ok()?;
        num.clear();
        let unit_secs = match (in_time, ch) {
            (false, 'W') => SECS_PER_WEEK,
            (false, 'D') => SECS_PER_DAY,
            (true, 'H') => SECS_PER_HOUR,
            (true, 'M') => SECS_PER_MINUTE,
            (true, 'S') => 1,
            // Y/M date designators have no fixed length; time units before
            // the T separator are malformed.
            _ => return None,
        };
        secs = secs.checked_add(value.checked_mul(unit_secs)?)?;
        saw_unit = true;
        saw_time_unit = in_time;
    }

    // Trailing digits without a designator, a bare "P"/"PT", or a "T"
    // separator with no time component after it.
    if !num.is_empty() || !saw_unit || (in_time && !saw_time_unit) {
        return None;
    }

    Some(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_time_designators() {
        assert_eq!(parse_duration("PT4M13S"), Duration::from_secs(4 * 60 + 13));
        assert_eq!(parse_duration("PT1H30M15S"), Duration::from_secs(5415));
        assert_eq!(parse_duration("PT5M"), Duration::from_secs(300));
        assert_eq!(parse_duration("PT45S"), Duration::from_secs(45));
        assert_eq!(parse_duration("PT1H"), Duration::from_secs(3600));
        assert_eq!(parse_duration("PT0S"), Duration::ZERO);
    }

    #[test]
    fn parses_date_designators() {
        assert_eq!(parse_duration("P1W"), Duration::from_secs(604_800));
        assert_eq!(parse_duration("P2D"), Duration::from_secs(2 * 86_400));
        assert_eq!(parse_duration("P1DT2H"), Duration::from_secs(93_600));
        assert_eq!(parse_duration("P1W2DT3H4M5S"), Duration::from_secs(788_645));
    }

    #[test]
    fn minutes_seconds_grid_matches_arithmetic() {
        for minutes in [0u64, 1, 4, 59, 120] {
            for seconds in [0u64, 1, 13, 59] {
                let raw = format!("PT{minutes}M{seconds}S");
                assert_eq!(
                    parse_duration(&raw),
                    Duration::from_secs(minutes * 60 + seconds),
                    "failed for {raw}"
                );
            }
        }
    }

    #[test]
    fn malformed_input_degrades_to_zero() {
        assert_eq!(parse_duration(""), Duration::ZERO);
        assert_eq!(parse_duration("P"), Duration::ZERO);
        assert_eq!(parse_duration("PT"), Duration::ZERO);
        assert_eq!(parse_duration("4M13S"), Duration::ZERO);
        assert_eq!(parse_duration("invalid"), Duration::ZERO);
        // Time units require the T separator.
        assert_eq!(parse_duration("P5S"), Duration::ZERO);
        assert_eq!(parse_duration("P1H"), Duration::ZERO);
        // Month designators are not a fixed length.
        assert_eq!(parse_duration("P1M"), Duration::ZERO);
        // Trailing value without a designator.
        assert_eq!(parse_duration("PT5"), Duration::ZERO);
        // Fractional seconds are treated as malformed.
        assert_eq!(parse_duration("PT1.5S"), Duration::ZERO);
        // Doubled separator.
        assert_eq!(parse_duration("PTT5S"), Duration::ZERO);
        // Trailing separator with no time component after it.
        assert_eq!(parse_duration("P1DT"), Duration::ZERO);
        assert_eq!(parse_duration("P2WT"), Duration::ZERO);
        // Values too large for u64 fail the parse instead of panicking.
        assert_eq!(parse_duration("PT99999999999999999999S"), Duration::ZERO);
    }
}
