//! Word-count ledger.
//!
//! # Responsibility
//! - Keep the date-keyed history of (narrative, narrative+unused) word
//!   counts and the pending updates staged between read and write.
//!
//! # Invariants
//! - The persisted log is only mutated by `merge_pending`; a read-only
//!   session never changes it.
//! - Pending updates are cleared on every write, merged or not.

use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

/// One day's totals: narrative words, and narrative plus unused words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCount {
    pub count: u32,
    pub with_unused: u32,
}

/// Date-keyed word-count history with staged updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WcLog {
    entries: BTreeMap<NaiveDate, WordCount>,
    pending: BTreeMap<NaiveDate, WordCount>,
}

impl WcLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a persisted entry directly, as read from disk.
    pub fn insert(&mut self, date: NaiveDate, word_count: WordCount) {
        self.entries.insert(date, word_count);
    }

    /// Latest persisted entry by date.
    pub fn latest(&self) -> Option<(NaiveDate, WordCount)> {
        self.entries
            .iter()
            .next_back()
            .map(|(date, wc)| (*date, *wc))
    }

    pub fn entries(&self) -> impl Iterator<Item = (NaiveDate, WordCount)> + '_ {
        self.entries.iter().map(|(date, wc)| (*date, *wc))
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Stages an update to be merged on the next write.
    pub fn stage(&mut self, date: NaiveDate, word_count: WordCount) {
        self.pending.insert(date, word_count);
    }

    /// Stages the actual count under `date` when the log exists but its
    /// latest entry disagrees. Called after a read so that the on-disk
    /// log catches up on the next save.
    pub fn keep_actual(&mut self, actual: WordCount, date: NaiveDate) {
        let Some((_, latest)) = self.latest() else {
            return;
        };
        if latest != actual {
            debug!(
                "event=wc_catchup date={date} count={} with_unused={}",
                actual.count, actual.with_unused
            );
            self.stage(date, actual);
        }
    }

    /// Write-time update: with logging enabled, stage today's figures and
    /// merge everything pending; with logging disabled, discard pending.
    pub fn update_on_write(&mut self, logging_enabled: bool, today: NaiveDate, actual: WordCount) {
        if logging_enabled {
            self.stage(today, actual);
            let pending = std::mem::take(&mut self.pending);
            self.entries.extend(pending);
        } else {
            self.pending.clear();
        }
    }

    /// Entries with consecutive duplicates removed, as persisted by the
    /// format engine.
    pub fn compacted(&self) -> Vec<(NaiveDate, WordCount)> {
        let mut result: Vec<(NaiveDate, WordCount)> = Vec::new();
        for (date, wc) in self.entries() {
            if result.last().map(|(_, previous)| *previous) != Some(wc) {
                result.push((date, wc));
            }
        }
        result
    }
}
