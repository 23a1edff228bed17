//! Bounded history of time-labelled entries.
//!
//! Each refresh of the portal returns the same months and bills again, so
//! entries are merged by their time label instead of appended. The history
//! keeps insertion order and, once it holds more than `capacity` entries,
//! evicts the entry with the earliest time label.
//!
//! Labels are year-first with zero-padded fields ("2024年05月", "2024-05-14"),
//! so comparing them as strings orders them in time.

use serde::{Serialize, Serializer};
use std::collections::VecDeque;

/// Entries that can be identified by a time label.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Outcome of merging a batch into a [`History`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub inserted: usize,
    pub replaced: usize,
    pub evicted: usize,
}

#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T: Keyed> History<T> {
    /// Creates an empty history holding at most `capacity` entries.
    ///
    /// A zero capacity is bumped to one so the newest entry is always kept.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Replaces the entry with the same key in place, or appends a new one
    /// at the newest end. Returns `true` if an existing entry was replaced.
    pub fn upsert(&mut self, entry: T) -> bool {
        match self.entries.iter().position(|e| e.key() == entry.key()) {
            Some(index) => {
                self.entries[index] = entry;
                true
            }
            None => {
                self.entries.push_back(entry);
                false
            }
        }
    }

    /// Upserts every entry in order, then evicts the earliest labels until
    /// the history fits its capacity.
    pub fn merge(&mut self, entries: impl IntoIterator<Item = T>) -> MergeStats {
        let mut stats = MergeStats::default();
        for entry in entries {
            if self.upsert(entry) {
                stats.replaced += 1;
            } else {
                stats.inserted += 1;
            }
        }
        while self.entries.len() > self.capacity {
            match self.earliest_index() {
                Some(index) => {
                    self.entries.remove(index);
                    stats.evicted += 1;
                }
                None => break,
            }
        }
        stats
    }

    fn earliest_index(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.key().cmp(b.key()))
            .map(|(index, _)| index)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.key() == key)
    }

    /// Entry with the latest time label.
    pub fn latest(&self) -> Option<&T> {
        self.entries.iter().max_by(|a, b| a.key().cmp(b.key()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Serialize> Serialize for History<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}
