use std::fmt::Display;

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::{CommandFactory, ValueEnum};

use crate::utils::time::date_to_entry_date;

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// Turns user input into an entry date. `2025-03-15` is taken as is, anything else goes through
/// english parsing ("yesterday", "last friday", "15/03/2025"). Without input it's `today`.
pub fn resolve_entry_date(
    input: Option<&str>,
    today: NaiveDate,
    now: DateTime<Local>,
    date_style: DateStyle,
) -> Result<String> {
    let Some(input) = input else {
        return Ok(date_to_entry_date(today));
    };

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date_to_entry_date(date));
    }

    match parse_date_string(input, now, date_style.into()) {
        Ok(v) => Ok(date_to_entry_date(v.date_naive())),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {input:?}: {e}"),
            )
            .into()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate, TimeZone};
    use rstest::rstest;

    use super::{resolve_entry_date, DateStyle};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    #[rstest]
    #[case::missing(None, "2025-03-12")]
    #[case::iso(Some("2024-02-29"), "2024-02-29")]
    #[case::yesterday(Some("yesterday"), "2025-03-11")]
    #[case::uk_style(Some("15/03/2025"), "2025-03-15")]
    fn test_resolve_entry_date(#[case] input: Option<&str>, #[case] expected: &str) {
        let now = Local.with_ymd_and_hms(2025, 3, 12, 12, 0, 0).unwrap();

        assert_eq!(
            resolve_entry_date(input, today(), now, DateStyle::Uk).unwrap(),
            expected
        );
    }

    #[test]
    fn test_resolve_entry_date_rejects_nonsense() {
        let now = Local.with_ymd_and_hms(2025, 3, 12, 12, 0, 0).unwrap();

        assert!(resolve_entry_date(Some("not a date"), today(), now, DateStyle::Uk).is_err());
    }
}
