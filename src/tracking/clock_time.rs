use std::{fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::warn;

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Reasons a clock string like `1:25 PM` can't be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("expected \"<hour>:<minute> <AM|PM>\", got {0:?}")]
    MissingMeridiem(String),
    #[error("expected \"<hour>:<minute>\" before the meridiem, got {0:?}")]
    MissingSeparator(String),
    #[error("{0:?} is not a whole number")]
    InvalidNumber(String),
    #[error("{0:?} is too large to count in minutes")]
    OutOfRange(String),
}

/// A wall clock reading taken from a 12-hour string, kept as minutes since midnight.
///
/// Hour and minute aren't range checked. `13:75 PM` happily becomes `25 * 60 + 75`, which is what
/// stored entries have always been computed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(i64);

impl ClockTime {
    pub fn from_minutes(minutes: i64) -> Self {
        Self(minutes)
    }

    pub fn minutes(&self) -> i64 {
        self.0
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.0.div_euclid(60), self.0.rem_euclid(60))
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_clock_time(s)
    }
}

/// Reads `H:MM AM/PM` or `HH:MM AM/PM`.
///
/// `12 AM` is midnight and `12 PM` is noon. A marker other than AM/PM leaves the hour untouched.
pub fn parse_clock_time(value: &str) -> Result<ClockTime, TimeParseError> {
    let mut parts = value.split_whitespace();
    let (Some(clock), Some(meridiem), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(TimeParseError::MissingMeridiem(value.to_string()));
    };

    let mut clock_parts = clock.split(':');
    let (Some(hour), Some(minute), None) =
        (clock_parts.next(), clock_parts.next(), clock_parts.next())
    else {
        return Err(TimeParseError::MissingSeparator(clock.to_string()));
    };

    let mut hour = parse_number(hour)?;
    let minute = parse_number(minute)?;
    let out_of_range = || TimeParseError::OutOfRange(clock.to_string());

    if meridiem.eq_ignore_ascii_case("PM") && hour != 12 {
        hour = hour.checked_add(12).ok_or_else(out_of_range)?;
    } else if meridiem.eq_ignore_ascii_case("AM") && hour == 12 {
        hour = 0;
    }

    hour.checked_mul(60)
        .and_then(|v| v.checked_add(minute))
        .map(ClockTime)
        .ok_or_else(out_of_range)
}

fn parse_number(value: &str) -> Result<i64, TimeParseError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| TimeParseError::InvalidNumber(value.to_string()))
}

/// Lenient variant of [parse_clock_time]. Anything unreadable counts as midnight so that entry
/// creation never fails on a badly typed time.
pub fn parse_to_minutes(value: &str) -> i64 {
    match parse_clock_time(value) {
        Ok(time) => time.minutes(),
        Err(e) => {
            warn!("Treating {value:?} as midnight: {e}");
            0
        }
    }
}
