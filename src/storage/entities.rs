use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tracking::duration::compute_duration;

/// Payload for recording a new entry. Duration is never part of it, it's always derived.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct NewTimeEntry {
    /// `H:MM AM/PM` or `HH:MM AM/PM`, kept exactly as typed.
    pub start_time: String,
    pub end_time: String,
    /// `YYYY-MM-DD`. This is the day the entry counts towards, even if the times roll past
    /// midnight.
    pub date: String,
    pub description: String,
    pub tag: String,
}

/// The struct stored on disk, one per line.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct TimeEntry {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    pub date: String,
    pub description: String,
    pub tag: String,
    pub duration_minutes: i64,
    pub created_at: DateTime<Utc>,
}

impl TimeEntry {
    /// Turns a payload into a record with a fresh id and a computed duration.
    pub fn create(
        NewTimeEntry {
            start_time,
            end_time,
            date,
            description,
            tag,
        }: NewTimeEntry,
        created_at: DateTime<Utc>,
    ) -> Self {
        let duration_minutes = compute_duration(&start_time, &end_time);
        TimeEntry {
            id: Uuid::new_v4().to_string(),
            start_time,
            end_time,
            date,
            description,
            tag,
            duration_minutes,
            created_at,
        }
    }
}
