//! Time windows and calendar periods.
//!
//! All boundaries are computed in UTC. A [`TimeWindow`] is a closed interval:
//! both `start` and `end` are inside it. A [`Period`] is one calendar month.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Serialize, Serializer};

use crate::error::{HealthHubError, Result};

/// Closed interval `[start, end]` of UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Fails with `InvalidTimeWindow` when `end` precedes `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(HealthHubError::InvalidTimeWindow(format!(
                "end {end} precedes start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// From the first instant of `now`'s calendar month up to `now`.
    pub fn month_to_date(now: DateTime<Utc>) -> Result<Self> {
        Self::new(Period::of(now).start()?, now)
    }

    /// The `days * 24h` ending at `now`, both endpoints included.
    pub fn trailing_days(now: DateTime<Utc>, days: i64) -> Result<Self> {
        let span = Duration::try_days(days).ok_or_else(|| {
            HealthHubError::InvalidTimeWindow(format!("{days} days is out of range"))
        })?;
        let start = now.checked_sub_signed(span).ok_or_else(|| {
            HealthHubError::InvalidTimeWindow(format!("{now} minus {days} days underflows"))
        })?;
        Self::new(start, now)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

/// One UTC calendar month. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Returns `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `t`.
    pub fn of(t: DateTime<Utc>) -> Self {
        Self {
            year: t.year(),
            month: t.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First instant of the month.
    pub fn start(&self) -> Result<DateTime<Utc>> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|t| t.and_utc())
            .ok_or_else(|| {
                HealthHubError::InvalidTimeWindow(format!("no start instant for period {self}"))
            })
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// The `count` months ending with the month containing `now`, oldest first.
    pub fn trailing(now: DateTime<Utc>, count: usize) -> Vec<Self> {
        let mut out = Vec::with_capacity(count);
        let mut p = Self::of(now);
        for _ in 0..count {
            out.push(p);
            p = p.prev();
        }
        out.reverse();
        out
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
