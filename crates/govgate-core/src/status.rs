//! Grant status derivation
//!
//! A grant's outcome is carried by two booleans on the wire, `Granted` and
//! `Decline`, plus an optional `EndDate`. This module is the single place
//! that turns them into a status.
//!
//! ```text
//! Decline                        -> Declined   (terminal)
//! Granted, EndDate < now         -> Expired
//! Granted, no EndDate or >= now  -> Active
//! otherwise                      -> Pending    (EndDate ignored)
//! ```
//!
//! The backend never states whether `Granted && Decline` can occur. When it
//! does, `Decline` wins and [`Decision::is_conflicting`] reports the
//! inconsistency so callers can log it.

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three fields status derivation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decision {
    pub granted: bool,
    pub decline: bool,
    pub end_date: Option<DateTime<Utc>>,
}

impl Decision {
    pub fn new(granted: bool, decline: bool, end_date: Option<DateTime<Utc>>) -> Self {
        Self {
            granted,
            decline,
            end_date,
        }
    }

    /// Both flags set: an outcome the backend should never produce.
    pub fn is_conflicting(&self) -> bool {
        self.granted && self.decline
    }

    /// Whether any decision has been recorded.
    pub fn is_decided(&self) -> bool {
        self.granted || self.decline
    }
}

/// Records that carry a grant decision (requests and grants).
pub trait Decided {
    /// The decision as of `now`. Most records ignore `now`; grants whose
    /// payload omits `Granted` infer it from `StartDate`.
    fn decision(&self, now: DateTime<Utc>) -> Decision;
}

impl Decided for Decision {
    fn decision(&self, _now: DateTime<Utc>) -> Decision {
        *self
    }
}

/// Lifecycle state of a request's grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantStatus {
    Pending,
    Active,
    Expired,
    Declined,
}

impl GrantStatus {
    pub const ALL: [GrantStatus; 4] = [
        GrantStatus::Pending,
        GrantStatus::Active,
        GrantStatus::Expired,
        GrantStatus::Declined,
    ];

    /// Derive the status of a decision at wall-clock instant `now`.
    ///
    /// Not stable over time: an Active grant becomes Expired once `now`
    /// passes its `EndDate`, without any change to the record.
    pub fn derive(decision: &Decision, now: DateTime<Utc>) -> Self {
        if decision.decline {
            GrantStatus::Declined
        } else if decision.granted {
            match decision.end_date {
                Some(end) if end < now => GrantStatus::Expired,
                _ => GrantStatus::Active,
            }
        } else {
            GrantStatus::Pending
        }
    }

    /// Status of any decided record at `now`.
    pub fn of<T: Decided + ?Sized>(record: &T, now: DateTime<Utc>) -> Self {
        Self::derive(&record.decision(now), now)
    }

    pub fn label(&self) -> &'static str {
        match self {
            GrantStatus::Pending => "Pending",
            GrantStatus::Active => "Active",
            GrantStatus::Expired => "Expired",
            GrantStatus::Declined => "Declined",
        }
    }

    /// Declined grants never change state again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GrantStatus::Declined)
    }
}

impl fmt::Display for GrantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GrantStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(GrantStatus::Pending),
            "active" | "approved" => Ok(GrantStatus::Active),
            "expired" => Ok(GrantStatus::Expired),
            "declined" | "rejected" => Ok(GrantStatus::Declined),
            _ => Err(CoreError::UnknownVariant {
                kind: "status",
                value: s.to_string(),
                expected: "pending, active, expired, declined",
            }),
        }
    }
}

/// Per-status tally over a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub active: usize,
    pub expired: usize,
    pub declined: usize,
}

impl StatusCounts {
    pub fn tally<'a, T, I>(records: I, now: DateTime<Utc>) -> Self
    where
        T: Decided + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut counts = Self::default();
        for record in records {
            counts.record(GrantStatus::of(record, now));
        }
        counts
    }

    pub fn record(&mut self, status: GrantStatus) {
        match status {
            GrantStatus::Pending => self.pending += 1,
            GrantStatus::Active => self.active += 1,
            GrantStatus::Expired => self.expired += 1,
            GrantStatus::Declined => self.declined += 1,
        }
    }

    pub fn get(&self, status: GrantStatus) -> usize {
        match status {
            GrantStatus::Pending => self.pending,
            GrantStatus::Active => self.active,
            GrantStatus::Expired => self.expired,
            GrantStatus::Declined => self.declined,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.active + self.expired + self.declined
    }
}
