use crate::snapshot::DecodedSnapshot;
use chrono::{Days, NaiveDate};
use std::collections::HashSet;
use tracing::info;

/// Snapshots dated on or after `today - RECENT_WINDOW_DAYS` are all kept.
pub const RECENT_WINDOW_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepReason {
    /// Inside the recent window, kept unconditionally.
    Recent,
    /// Older than the window and the earliest snapshot of its day.
    EarliestOfDay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retained {
    pub snapshot: DecodedSnapshot,
    pub reason: KeepReason,
}

/// Partition of the decoded snapshots. `keep` and `delete` are disjoint and
/// both follow ordinal name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionDecision {
    pub today: NaiveDate,
    pub threshold: NaiveDate,
    pub keep: Vec<Retained>,
    pub delete: Vec<DecodedSnapshot>,
}

impl RetentionDecision {
    pub fn keep_names(&self) -> Vec<&str> {
        self.keep.iter().map(|r| r.snapshot.raw_name.as_str()).collect()
    }

    pub fn delete_names(&self) -> Vec<&str> {
        self.delete.iter().map(|s| s.raw_name.as_str()).collect()
    }
}

/// Lower bound of the recent window for a given reference day.
pub fn threshold_for(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(RECENT_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN)
}

/// Split snapshots into keep/delete relative to `today`.
///
/// Everything dated `>= threshold` is kept. Older days keep only their
/// ordinally-first name, which is also the earliest snapshot of that day
/// because the date and hour fields are zero-padded.
pub fn classify(snapshots: Vec<DecodedSnapshot>, today: NaiveDate) -> RetentionDecision {
    let threshold = threshold_for(today);

    let mut sorted = snapshots;
    sorted.sort_by(|a, b| a.raw_name.as_bytes().cmp(b.raw_name.as_bytes()));

    let mut kept_days: HashSet<String> = HashSet::new();
    let mut keep = Vec::new();
    let mut delete = Vec::new();

    for snapshot in sorted {
        if snapshot.calendar_date >= threshold {
            info!(
                "Keeping recent snapshot '{}' ({})",
                snapshot.raw_name, snapshot.date_key
            );
            keep.push(Retained {
                snapshot,
                reason: KeepReason::Recent,
            });
        } else if kept_days.insert(snapshot.date_key.clone()) {
            info!(
                "Keeping earliest snapshot of {}: '{}'",
                snapshot.date_key, snapshot.raw_name
            );
            keep.push(Retained {
                snapshot,
                reason: KeepReason::EarliestOfDay,
            });
        } else {
            info!(
                "Snapshot '{}' superseded by an earlier one on {}",
                snapshot.raw_name, snapshot.date_key
            );
            delete.push(snapshot);
        }
    }

    RetentionDecision {
        today,
        threshold,
        keep,
        delete,
    }
}
