use std::{
    collections::BTreeSet,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
};
use tracing::{debug, warn};

use super::entities::TimeEntry;

/// Maximum amount of entries a single query returns.
pub const QUERY_LIMIT: usize = 1000;

const ENTRIES_FILE: &str = "entries.jsonl";

/// Interface for abstracting storage of entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryStorage: Send + Sync {
    async fn insert(&self, entry: &TimeEntry) -> Result<()>;

    /// Every entry ordered by start time string.
    async fn all_entries(&self) -> Result<Vec<TimeEntry>>;

    /// Entries attributed to `date`, ordered by start time string.
    async fn entries_for_date(&self, date: &str) -> Result<Vec<TimeEntry>>;

    /// Entries with `start <= date <= end`. Dates are compared as strings.
    async fn entries_between(&self, start: &str, end: &str) -> Result<Vec<TimeEntry>>;

    async fn distinct_tags(&self) -> Result<BTreeSet<String>>;
}

/// The main realization of [EntryStorage]. All entries live in a single file, one json object
/// per line.
pub struct JsonLinesEntryStorage {
    path: PathBuf,
}

impl JsonLinesEntryStorage {
    pub fn new(dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&dir)?;

        Ok(Self {
            path: dir.join(ENTRIES_FILE),
        })
    }

    async fn read_all(&self) -> Result<Vec<TimeEntry>> {
        async fn extract(path: &Path) -> std::result::Result<Vec<TimeEntry>, std::io::Error> {
            debug!("Extracting {path:?}");
            let mut file = File::open(path).await?;
            file.lock_shared()?;
            let mut lines = BufReader::new(&mut file).split(b'\n');
            let mut entries = vec![];
            while let Some(line) = lines.next_segment().await? {
                if line.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                // Raw bytes, so a line cut inside a multibyte character fails only itself
                match serde_json::from_slice::<TimeEntry>(&line) {
                    Ok(v) => entries.push(v),
                    Err(e) => {
                        // A write cut short by a crash leaves half a line behind
                        warn!(
                            "Skipping illegal json string in {path:?} {}: {e}",
                            String::from_utf8_lossy(&line)
                        )
                    }
                }
            }
            drop(lines);

            file.unlock_async().await?;

            Ok(entries)
        }

        match extract(&self.path).await {
            Ok(entries) => Ok(entries),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(vec![]),
            Err(e) => Err(e).with_context(|| format!("Failed to read entries from {:?}", self.path)),
        }
    }

    async fn query(&self, filter: impl Fn(&TimeEntry) -> bool) -> Result<Vec<TimeEntry>> {
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .filter(filter)
            .take(QUERY_LIMIT)
            .collect())
    }
}

fn sort_by_start_time(mut entries: Vec<TimeEntry>) -> Vec<TimeEntry> {
    entries.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    entries
}

#[async_trait]
impl EntryStorage for JsonLinesEntryStorage {
    async fn insert(&self, entry: &TimeEntry) -> Result<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let mut file = File::options()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open {:?}", self.path))?;

        file.lock_exclusive()?;
        let result = async {
            file.write_all(&line).await?;
            file.flush().await
        }
        .await;
        file.unlock_async().await?;

        result.with_context(|| format!("Failed to append entry {}", entry.id))
    }

    async fn all_entries(&self) -> Result<Vec<TimeEntry>> {
        let entries = self.read_all().await?;
        Ok(sort_by_start_time(entries)
            .into_iter()
            .take(QUERY_LIMIT)
            .collect())
    }

    async fn entries_for_date(&self, date: &str) -> Result<Vec<TimeEntry>> {
        let entries = self.read_all().await?;
        Ok(sort_by_start_time(entries)
            .into_iter()
            .filter(|entry| entry.date == date)
            .take(QUERY_LIMIT)
            .collect())
    }

    async fn entries_between(&self, start: &str, end: &str) -> Result<Vec<TimeEntry>> {
        self.query(|entry| start <= entry.date.as_str() && entry.date.as_str() <= end)
            .await
    }

    async fn distinct_tags(&self) -> Result<BTreeSet<String>> {
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .map(|entry| entry.tag)
            .collect())
    }
}
