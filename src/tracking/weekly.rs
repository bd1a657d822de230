use std::{
    collections::{BTreeSet, HashMap},
    fmt::Display,
};

use serde::{Deserialize, Serialize};

use crate::{
    storage::entities::TimeEntry,
    utils::percentage::{change_percentage, round_to, Percentage},
};

/// Averages are always taken over a whole week, missing days count as zero.
pub const DAYS_PER_WEEK: f64 = 7.;

/// Changes smaller than this (in percent, either direction) are considered noise.
pub const STABLE_THRESHOLD: f64 = 5.;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn classify(change: Percentage) -> Self {
        if change.abs() < STABLE_THRESHOLD {
            Trend::Stable
        } else if *change > 0. {
            Trend::Increasing
        } else {
            Trend::Decreasing
        }
    }
}

impl Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Increasing => write!(f, "increasing"),
            Trend::Decreasing => write!(f, "decreasing"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

/// Week over week comparison for one tag. Averages are minutes per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStat {
    pub tag: String,
    pub current_week_avg: f64,
    pub previous_week_avg: f64,
    pub change_percentage: Percentage,
    pub trend: Trend,
}

fn totals_by_tag(entries: &[TimeEntry]) -> HashMap<&str, i64> {
    let mut totals = HashMap::new();
    for entry in entries {
        *totals.entry(entry.tag.as_str()).or_insert(0) += entry.duration_minutes;
    }
    totals
}

/// Compares two weeks of entries, producing one stat for every tag seen in either of them.
///
/// Trends are classified on the unrounded change, only the reported numbers are rounded to one
/// decimal. The result is ordered by tag, though nothing should depend on that.
pub fn analyze_week(
    current_week_entries: &[TimeEntry],
    previous_week_entries: &[TimeEntry],
) -> Vec<WeeklyStat> {
    let current_totals = totals_by_tag(current_week_entries);
    let previous_totals = totals_by_tag(previous_week_entries);

    let all_tags = current_totals
        .keys()
        .chain(previous_totals.keys())
        .copied()
        .collect::<BTreeSet<_>>();

    all_tags
        .into_iter()
        .map(|tag| {
            let current_avg =
                current_totals.get(tag).copied().unwrap_or(0) as f64 / DAYS_PER_WEEK;
            let previous_avg =
                previous_totals.get(tag).copied().unwrap_or(0) as f64 / DAYS_PER_WEEK;
            let change = change_percentage(current_avg, previous_avg);

            WeeklyStat {
                tag: tag.to_string(),
                current_week_avg: round_to(current_avg, 1),
                previous_week_avg: round_to(previous_avg, 1),
                change_percentage: change.rounded(1),
                trend: Trend::classify(change),
            }
        })
        .collect()
}
