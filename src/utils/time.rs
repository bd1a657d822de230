use chrono::{Datelike, Duration, NaiveDate};

/// This is the standard way of converting a date to a string in daytally.
pub fn date_to_entry_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Inclusive range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Monday to Sunday week containing `day`.
    pub fn week_of(day: NaiveDate) -> Self {
        let start = day - Duration::days(day.weekday().num_days_from_monday() as i64);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// The window of the same length right before this one.
    pub fn preceding(&self) -> Self {
        let length = self.end - self.start + Duration::days(1);
        Self {
            start: self.start - length,
            end: self.end - length,
        }
    }

    /// Bounds as entry date strings. Entries are filtered on the strings themselves.
    pub fn entry_dates(&self) -> (String, String) {
        (date_to_entry_date(self.start), date_to_entry_date(self.end))
    }
}

/// Returns the week containing `today` and the week before it.
pub fn week_windows(today: NaiveDate) -> (DateWindow, DateWindow) {
    let current = DateWindow::week_of(today);
    (current, current.preceding())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::{date_to_entry_date, week_windows, DateWindow};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case::monday(date(2025, 3, 10))]
    #[case::wednesday(date(2025, 3, 12))]
    #[case::sunday(date(2025, 3, 16))]
    fn test_week_of(#[case] day: NaiveDate) {
        assert_eq!(
            DateWindow::week_of(day),
            DateWindow {
                start: date(2025, 3, 10),
                end: date(2025, 3, 16)
            }
        );
    }

    #[test]
    fn test_week_windows_cross_year() {
        let (current, previous) = week_windows(date(2025, 1, 1));

        assert_eq!(current.entry_dates(), ("2024-12-30".into(), "2025-01-05".into()));
        assert_eq!(previous.entry_dates(), ("2024-12-23".into(), "2024-12-29".into()));
    }

    #[test]
    fn test_date_to_entry_date_pads() {
        assert_eq!(date_to_entry_date(date(2025, 3, 5)), "2025-03-05");
    }
}
