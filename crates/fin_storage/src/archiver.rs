use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, NaiveTime};
use fin_core::{ArticleRecord, DatasetStore, Error, Result};
use tracing::{error, info, warn};

/// What a retention pass did to the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct RetentionOutcome {
    pub cutoff: NaiveDateTime,
    pub merged: usize,
    pub archived: usize,
    pub archive_number: Option<u32>,
    pub archive_error: Option<String>,
    pub duplicates_dropped: usize,
    pub current: usize,
    pub saved: bool,
}

/// One greater than the highest existing number, or 1. Gaps are left alone.
pub fn next_archive_number(existing: &[u32]) -> Result<u32> {
    match existing.iter().max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            Error::ArchiveWrite(format!("archive numbers exhausted (highest is {})", max))
        }),
    }
}

/// Splits records into those published before `cutoff` and the rest,
/// preserving order. Dates are compared at midnight.
pub fn partition_by_age(
    records: Vec<ArticleRecord>,
    cutoff: NaiveDateTime,
) -> (Vec<ArticleRecord>, Vec<ArticleRecord>) {
    records
        .into_iter()
        .partition(|r| r.published_date.and_time(NaiveTime::MIN) < cutoff)
}

/// Keeps the first record seen for each exact link.
/// Returns the survivors and the number of dropped duplicates.
pub fn dedup_by_link(records: Vec<ArticleRecord>) -> (Vec<ArticleRecord>, usize) {
    let total = records.len();
    let mut seen = HashSet::new();
    let kept: Vec<ArticleRecord> = records
        .into_iter()
        .filter(|r| seen.insert(r.link.clone()))
        .collect();
    let dropped = total - kept.len();
    (kept, dropped)
}

/// Merges newly collected records into the dataset, moves aged-out records
/// into a fresh archive partition and rewrites the current window.
pub struct RetentionArchiver {
    store: Arc<dyn DatasetStore>,
    retention_days: i64,
}

impl fmt::Debug for RetentionArchiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetentionArchiver")
            .field("store", &"<dyn DatasetStore>")
            .field("retention_days", &self.retention_days)
            .finish()
    }
}

impl RetentionArchiver {
    pub fn new(store: Arc<dyn DatasetStore>, retention_days: i64) -> Self {
        Self {
            store,
            retention_days,
        }
    }

    pub fn cutoff(&self, now: NaiveDateTime) -> NaiveDateTime {
        now - Duration::days(self.retention_days)
    }

    pub async fn load_existing(&self) -> Result<Vec<ArticleRecord>> {
        self.store.load_current().await
    }

    /// Loads the current window itself, then applies retention.
    pub async fn run(&self, collected: Vec<ArticleRecord>, now: NaiveDateTime) -> Result<RetentionOutcome> {
        let existing = self.load_existing().await?;
        self.apply(existing, collected, now).await
    }

    /// Retention over an already loaded current window. Existing records come
    /// first so they win over newly collected duplicates.
    pub async fn apply(
        &self,
        existing: Vec<ArticleRecord>,
        collected: Vec<ArticleRecord>,
        now: NaiveDateTime,
    ) -> Result<RetentionOutcome> {
        let cutoff = self.cutoff(now);
        let mut merged = existing;
        merged.extend(collected);

        let mut outcome = RetentionOutcome {
            cutoff,
            merged: merged.len(),
            archived: 0,
            archive_number: None,
            archive_error: None,
            duplicates_dropped: 0,
            current: 0,
            saved: false,
        };

        if merged.is_empty() {
            info!("📭 No articles found");
            return Ok(outcome);
        }

        let (old, current) = partition_by_age(merged, cutoff);

        if !old.is_empty() {
            outcome.archived = old.len();
            match self.archive(&old).await {
                Ok(number) => outcome.archive_number = Some(number),
                Err(e) => {
                    error!("❌ Failed to archive {} old articles: {}", old.len(), e);
                    outcome.archive_error = Some(e.to_string());
                }
            }
        }

        let (current, dropped) = dedup_by_link(current);
        if dropped > 0 {
            warn!("🔁 Dropped {} duplicate links from the current window", dropped);
        }
        outcome.duplicates_dropped = dropped;
        outcome.current = current.len();

        self.store.save_current(&current).await?;
        outcome.saved = true;
        info!(
            "💾 Current database contains {} articles (last {} days)",
            current.len(),
            self.retention_days
        );

        Ok(outcome)
    }

    async fn archive(&self, old: &[ArticleRecord]) -> Result<u32> {
        let existing = self.store.archive_numbers().await?;
        let number = next_archive_number(&existing)?;
        let location = self.store.write_archive(number, old).await?;
        info!("🗄️ Archived {} old articles to {}", old.len(), location);
        Ok(number)
    }
}
