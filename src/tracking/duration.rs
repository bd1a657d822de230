use tracing::warn;

use super::clock_time::{parse_to_minutes, MINUTES_PER_DAY};

/// Minutes between two clock strings. An end earlier than the start is taken to be on the next
/// day, so `11:00 PM` to `1:00 AM` is 120 minutes. Equal times give 0, never a full day.
///
/// Readings so far apart that the difference doesn't fit in an `i64` give 0.
pub fn compute_duration(start_time: &str, end_time: &str) -> i64 {
    let start = parse_to_minutes(start_time);
    let end = parse_to_minutes(end_time);

    let end = if end < start {
        end.checked_add(MINUTES_PER_DAY)
    } else {
        Some(end)
    };

    match end.and_then(|end| end.checked_sub(start)) {
        Some(duration) => duration,
        None => {
            warn!("Duration between {start_time:?} and {end_time:?} is out of range, using 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::compute_duration;

    #[rstest]
    #[case::same_morning("9:00 AM", "10:30 AM", 90)]
    #[case::across_noon("10:30 AM", "12:00 PM", 90)]
    #[case::overnight("11:00 PM", "1:00 AM", 120)]
    #[case::into_midnight("11:00 PM", "12:00 AM", 60)]
    #[case::same_time("9:00 AM", "9:00 AM", 0)]
    #[case::one_minute_short_of_a_day("9:01 AM", "9:00 AM", 1439)]
    #[case::unreadable_start("later", "2:00 AM", 120)]
    #[case::unreadable_end("2:00 AM", "?", 1320)]
    #[case::overflowing_start("9223372036854775807:00 AM", "1:00 AM", 60)]
    #[case::wrapped_difference_overflows("153722867280912930:00 AM", "-153722867280912930:00 AM", 0)]
    #[case::difference_overflows("-153722867280912930:00 AM", "153722867280912930:00 AM", 0)]
    fn test_compute_duration(#[case] start: &str, #[case] end: &str, #[case] expected: i64) {
        assert_eq!(compute_duration(start, end), expected);
    }

    fn clock_string() -> impl Strategy<Value = String> {
        (1u32..=12, 0u32..60, any::<bool>()).prop_map(|(hour, minute, pm)| {
            format!("{hour}:{minute:02} {}", if pm { "PM" } else { "AM" })
        })
    }

    proptest! {
        #[test]
        fn duration_is_never_negative(start in clock_string(), end in clock_string()) {
            let duration = compute_duration(&start, &end);
            prop_assert!(duration >= 0);
            prop_assert!(duration < 24 * 60);
        }
    }
}
