use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    storage::{
        entities::{NewTimeEntry, TimeEntry},
        entry_storage::EntryStorage,
    },
    tracking::{
        daily::{aggregate_day, DailySummary},
        tags::resolve_tags,
        weekly::{analyze_week, WeeklyStat},
    },
    utils::{clock::Clock, time::week_windows},
};

/// Daily totals as reported to users, labelled with the date they were asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAnalytics {
    pub date: String,
    pub tag_totals: BTreeMap<String, i64>,
    pub total_tracked_minutes: i64,
    pub total_tracked_hours: f64,
    pub entries_count: usize,
}

impl DailyAnalytics {
    fn new(
        date: String,
        DailySummary {
            tag_totals,
            total_minutes,
            total_hours,
            entry_count,
        }: DailySummary,
    ) -> Self {
        Self {
            date,
            tag_totals,
            total_tracked_minutes: total_minutes,
            total_tracked_hours: total_hours,
            entries_count: entry_count,
        }
    }
}

/// Bridges [EntryStorage] and the calculations in [crate::tracking]. Storage and clock are handed
/// in by whoever opens the application.
pub struct Tracker<S: EntryStorage> {
    storage: S,
    clock: Box<dyn Clock>,
}

impl<S: EntryStorage> Tracker<S> {
    pub fn new(storage: S, clock: Box<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Records an entry. The duration is always derived from the start and end times.
    #[instrument(skip(self), fields(tag = %new_entry.tag, date = %new_entry.date))]
    pub async fn create_entry(&self, new_entry: NewTimeEntry) -> Result<TimeEntry> {
        let entry = TimeEntry::create(new_entry, self.clock.time());
        self.storage
            .insert(&entry)
            .await
            .context("Failed to save time entry")?;
        info!("Recorded {} minutes", entry.duration_minutes);
        Ok(entry)
    }

    /// Entries for one date, or everything when no date is given.
    pub async fn list_entries(&self, date: Option<&str>) -> Result<Vec<TimeEntry>> {
        let entries = match date {
            Some(date) => self.storage.entries_for_date(date).await,
            None => self.storage.all_entries().await,
        };
        entries.context("Failed to retrieve time entries")
    }

    #[instrument(skip(self))]
    pub async fn daily_analytics(&self, date: &str) -> Result<DailyAnalytics> {
        let entries = self
            .storage
            .entries_for_date(date)
            .await
            .with_context(|| format!("Failed to retrieve entries for {date}"))?;
        debug!("Aggregating {} entries", entries.len());
        Ok(DailyAnalytics::new(date.to_string(), aggregate_day(&entries)))
    }

    /// Compares the week containing today with the week before it.
    #[instrument(skip(self))]
    pub async fn weekly_analytics(&self) -> Result<Vec<WeeklyStat>> {
        let (current, previous) = week_windows(self.clock.today());
        let (current_start, current_end) = current.entry_dates();
        let (previous_start, previous_end) = previous.entry_dates();
        info!("Current week {current_start}..={current_end}, previous week {previous_start}..={previous_end}");

        let current_entries = self
            .storage
            .entries_between(&current_start, &current_end)
            .await
            .context("Failed to retrieve current week entries")?;
        let previous_entries = self
            .storage
            .entries_between(&previous_start, &previous_end)
            .await
            .context("Failed to retrieve previous week entries")?;

        Ok(analyze_week(&current_entries, &previous_entries))
    }

    /// Default tags plus every tag that has been used so far.
    pub async fn available_tags(&self) -> Result<Vec<String>> {
        let tags = self
            .storage
            .distinct_tags()
            .await
            .context("Failed to retrieve tags")?;
        Ok(resolve_tags(tags))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use anyhow::{anyhow, Result};
    use chrono::{NaiveDate, TimeZone, Utc};
    use mockall::predicate::eq;
    use tempfile::tempdir;

    use super::Tracker;
    use crate::{
        storage::{
            entities::{NewTimeEntry, TimeEntry},
            entry_storage::{JsonLinesEntryStorage, MockEntryStorage},
        },
        tracking::weekly::Trend,
        utils::{clock::FixedClock, logging::TEST_LOGGING},
    };

    fn clock() -> Box<FixedClock> {
        Box::new(FixedClock {
            time: Utc.with_ymd_and_hms(2025, 3, 12, 18, 0, 0).unwrap(),
            // Wednesday
            today: NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
        })
    }

    fn new_entry(date: &str, start_time: &str, end_time: &str, tag: &str) -> NewTimeEntry {
        NewTimeEntry {
            start_time: start_time.into(),
            end_time: end_time.into(),
            date: date.into(),
            description: "something".into(),
            tag: tag.into(),
        }
    }

    #[tokio::test]
    async fn test_create_entry_saves_computed_duration() -> Result<()> {
        let mut storage = MockEntryStorage::new();
        storage
            .expect_insert()
            .withf(|entry: &TimeEntry| entry.duration_minutes == 120 && entry.tag == "Sleep")
            .times(1)
            .returning(|_| Ok(()));

        let tracker = Tracker::new(storage, clock());
        let entry = tracker
            .create_entry(new_entry("2025-03-11", "11:00 PM", "1:00 AM", "Sleep"))
            .await?;

        assert_eq!(entry.duration_minutes, 120);
        assert_eq!(entry.created_at, Utc.with_ymd_and_hms(2025, 3, 12, 18, 0, 0).unwrap());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_entry_propagates_storage_failure() {
        let mut storage = MockEntryStorage::new();
        storage
            .expect_insert()
            .returning(|_| Err(anyhow!("disk full")));

        let tracker = Tracker::new(storage, clock());
        let result = tracker
            .create_entry(new_entry("2025-03-11", "9:00 AM", "10:00 AM", "Sleep"))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_entries_picks_query() -> Result<()> {
        let mut storage = MockEntryStorage::new();
        storage
            .expect_entries_for_date()
            .with(eq("2025-03-12"))
            .times(1)
            .returning(|_| Ok(vec![]));
        storage.expect_all_entries().times(1).returning(|| Ok(vec![]));

        let tracker = Tracker::new(storage, clock());
        tracker.list_entries(Some("2025-03-12")).await?;
        tracker.list_entries(None).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_weekly_analytics_queries_monday_to_sunday() -> Result<()> {
        let mut storage = MockEntryStorage::new();
        let productive = |date: &str, end_time: &str| {
            TimeEntry::create(new_entry(date, "12:00 AM", end_time, "Productive"), Utc::now())
        };
        let current = vec![productive("2025-03-10", "7:00 AM")];
        let previous = vec![productive("2025-03-04", "5:50 AM")];
        storage
            .expect_entries_between()
            .with(eq("2025-03-10"), eq("2025-03-16"))
            .times(1)
            .returning(move |_, _| Ok(current.clone()));
        storage
            .expect_entries_between()
            .with(eq("2025-03-03"), eq("2025-03-09"))
            .times(1)
            .returning(move |_, _| Ok(previous.clone()));

        let tracker = Tracker::new(storage, clock());
        let stats = tracker.weekly_analytics().await?;

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].current_week_avg, 60.0);
        assert_eq!(stats[0].previous_week_avg, 50.0);
        assert_eq!(*stats[0].change_percentage, 20.0);
        assert_eq!(stats[0].trend, Trend::Increasing);
        Ok(())
    }

    #[tokio::test]
    async fn test_available_tags_merges_defaults() -> Result<()> {
        let mut storage = MockEntryStorage::new();
        storage
            .expect_distinct_tags()
            .returning(|| Ok(BTreeSet::from(["Gym".to_string(), "Sleep".to_string()])));

        let tracker = Tracker::new(storage, clock());
        let tags = tracker.available_tags().await?;

        assert_eq!(tags.len(), 7);
        assert!(tags.contains(&"Gym".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_daily_analytics_with_file_storage() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let tracker = Tracker::new(JsonLinesEntryStorage::new(dir.path().to_owned())?, clock());

        tracker
            .create_entry(new_entry("2025-03-12", "09:00 AM", "10:30 AM", "Self-Care"))
            .await?;
        tracker
            .create_entry(new_entry("2025-03-12", "10:30 AM", "12:00 PM", "Productive"))
            .await?;
        tracker
            .create_entry(new_entry("2025-03-13", "1:00 PM", "2:00 PM", "Productive"))
            .await?;

        let daily = tracker.daily_analytics("2025-03-12").await?;

        assert_eq!(daily.date, "2025-03-12");
        assert_eq!(daily.tag_totals["Self-Care"], 90);
        assert_eq!(daily.tag_totals["Productive"], 90);
        assert_eq!(daily.total_tracked_minutes, 180);
        assert_eq!(daily.total_tracked_hours, 3.0);
        assert_eq!(daily.entries_count, 2);

        let value = serde_json::to_value(&daily)?;
        assert_eq!(value["entries_count"], 2);
        assert_eq!(value["total_tracked_hours"], 3.0);
        Ok(())
    }
}
