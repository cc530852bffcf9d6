//! Time-boxed permission windows

use crate::error::{CoreError, Result};
use crate::time::format_timestamp;
use chrono::{DateTime, Duration, Utc};

/// Default length of a newly created permission window.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// A closed interval `[start, end]` during which a permission applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl PermissionWindow {
    /// Build a window; `end` must come strictly after `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(CoreError::InvalidWindow {
                start: format_timestamp(&start),
                end: format_timestamp(&end),
            });
        }
        Ok(Self { start, end })
    }

    /// Window starting at `start` and lasting [`DEFAULT_WINDOW_DAYS`].
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: start + Duration::days(DEFAULT_WINDOW_DAYS),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Open at `now`, bounds included.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now <= self.end
    }

    /// Time left before the window closes, if it has not closed yet.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        (now <= self.end).then(|| self.end - now.max(self.start))
    }
}
