use chrono::{DateTime, Local, TimeDelta};

/// Tracks when the collector last refreshed successfully.
///
/// A refresh is considered fresh for `max_age` after it completed. Polls
/// during that window are served from memory. Failed refreshes never mark
/// the data fresh, and a clock that moved backwards counts as stale.
#[derive(Debug, Clone)]
pub struct Freshness {
    max_age: TimeDelta,
    last_refreshed: Option<DateTime<Local>>,
}

impl Freshness {
    pub fn new(max_age: std::time::Duration) -> Self {
        Self {
            max_age: TimeDelta::from_std(max_age).unwrap_or(TimeDelta::MAX),
            last_refreshed: None,
        }
    }

    pub fn is_fresh(&self, now: DateTime<Local>) -> bool {
        match self.last_refreshed {
            Some(at) => {
                let age = now.signed_duration_since(at);
                age >= TimeDelta::zero() && age < self.max_age
            }
            None => false,
        }
    }

    pub fn mark_refreshed(&mut self, now: DateTime<Local>) {
        self.last_refreshed = Some(now);
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Local>> {
        self.last_refreshed
    }

    /// Earliest time at which a poll will hit the network again.
    pub fn next_refresh_at(&self) -> Option<DateTime<Local>> {
        self.last_refreshed
            .and_then(|at| at.checked_add_signed(self.max_age))
    }
}
