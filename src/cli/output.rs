use std::io::Write;

use ansi_term::Colour;
use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    storage::entities::TimeEntry,
    tracker::DailyAnalytics,
    tracking::weekly::{Trend, WeeklyStat},
};

pub fn print_json(writer: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value).context("Failed to serialize output")?;
    writeln!(writer)?;
    Ok(())
}

pub fn print_entries(writer: &mut impl Write, entries: &[TimeEntry]) -> Result<()> {
    for entry in entries {
        writeln!(
            writer,
            "{}\t{} ~ {}\t{}\t{}\t{}",
            entry.date,
            entry.start_time,
            entry.end_time,
            format_minutes(entry.duration_minutes),
            entry.tag,
            entry.description
        )
        .with_context(|| format!("Failed to write time entry: {:?}", entry.id))?;
    }
    Ok(())
}

pub fn print_daily(writer: &mut impl Write, daily: &DailyAnalytics) -> Result<()> {
    writeln!(writer, "## {}", daily.date)?;
    for (tag, minutes) in &daily.tag_totals {
        writeln!(writer, "{}\t{}", format_minutes(*minutes), tag)?;
    }
    writeln!(
        writer,
        "Total {} ({} hours) across {} entries",
        format_minutes(daily.total_tracked_minutes),
        daily.total_tracked_hours,
        daily.entries_count
    )?;
    Ok(())
}

/// Averages are minutes per day.
pub fn print_weekly(writer: &mut impl Write, stats: &[WeeklyStat], colored: bool) -> Result<()> {
    for stat in stats {
        let trend = match (colored, stat.trend) {
            (true, Trend::Increasing) => Colour::Green.paint(stat.trend.to_string()).to_string(),
            (true, Trend::Decreasing) => Colour::Red.paint(stat.trend.to_string()).to_string(),
            _ => stat.trend.to_string(),
        };
        writeln!(
            writer,
            "{}\t{}m/day\t{}m/day\t{}\t{}",
            stat.tag, stat.current_week_avg, stat.previous_week_avg, stat.change_percentage, trend
        )?;
    }
    Ok(())
}

pub fn print_tags(writer: &mut impl Write, tags: &[String]) -> Result<()> {
    for tag in tags {
        writeln!(writer, "{tag}")?;
    }
    Ok(())
}

fn format_minutes(minutes: i64) -> String {
    if minutes >= 60 {
        format!("{}h{}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}
