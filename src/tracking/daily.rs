use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{storage::entities::TimeEntry, utils::percentage::round_to};

/// Totals for a single day of entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailySummary {
    pub tag_totals: BTreeMap<String, i64>,
    pub total_minutes: i64,
    pub total_hours: f64,
    pub entry_count: usize,
}

/// Sums durations per tag and overall. Entries are expected to already belong to one date.
///
/// Tags are used as written, so an empty tag gets its own `""` bucket.
pub fn aggregate_day(entries: &[TimeEntry]) -> DailySummary {
    let mut tag_totals = BTreeMap::<String, i64>::new();
    let mut total_minutes = 0;

    for entry in entries {
        *tag_totals.entry(entry.tag.clone()).or_insert(0) += entry.duration_minutes;
        total_minutes += entry.duration_minutes;
    }

    DailySummary {
        tag_totals,
        total_minutes,
        total_hours: round_to(total_minutes as f64 / 60., 2),
        entry_count: entries.len(),
    }
}
