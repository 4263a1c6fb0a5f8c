//! Interval classifier: the single definition of "open".
//!
//! A risk is open over the half-open interval `[start, end)`:
//!   - lower bound inclusive: opened on `t` counts on `t`
//!   - upper bound exclusive: an end date equal to `t` no longer counts
//!   - an absent end never closes
//!
//! `expected_open` uses `[open_date, expected_end_date)`.
//! `actual_open` uses `[open_date, closure_date)`.
//! Every count in the crate goes through `OpenInterval`.

use crate::record::RiskRecord;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenInterval {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl OpenInterval {
    pub fn contains(&self, t: NaiveDate) -> bool {
        self.start <= t && self.end.map_or(true, |end| end > t)
    }

    /// An interval whose end is on or before its start contains no day.
    pub fn is_empty(&self) -> bool {
        self.end.is_some_and(|end| end <= self.start)
    }
}

pub fn expected_interval(r: &RiskRecord) -> OpenInterval {
    OpenInterval {
        start: r.open_date,
        end: Some(r.expected_end_date),
    }
}

pub fn actual_interval(r: &RiskRecord) -> OpenInterval {
    OpenInterval {
        start: r.open_date,
        end: r.closure_date,
    }
}

pub fn expected_open(r: &RiskRecord, t: NaiveDate) -> bool {
    expected_interval(r).contains(t)
}

pub fn actual_open(r: &RiskRecord, t: NaiveDate) -> bool {
    actual_interval(r).contains(t)
}

/// Sweep-line counter over a fixed set of intervals.
///
/// count(t) = #{starts <= t} - #{ends <= t}, taken over non-empty
/// intervals only. Equal to counting `contains(t)` directly.
#[derive(Debug, Clone, Default)]
pub struct OpenCounter {
    starts: Vec<NaiveDate>,
    ends: Vec<NaiveDate>,
}

impl OpenCounter {
    pub fn new<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = OpenInterval>,
    {
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        for interval in intervals.into_iter().filter(|i| !i.is_empty()) {
            starts.push(interval.start);
            if let Some(end) = interval.end {
                ends.push(end);
            }
        }
        starts.sort_unstable();
        ends.sort_unstable();
        Self { starts, ends }
    }

    pub fn expected<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RiskRecord>,
    {
        Self::new(records.into_iter().map(expected_interval))
    }

    pub fn actual<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RiskRecord>,
    {
        Self::new(records.into_iter().map(actual_interval))
    }

    pub fn count_at(&self, t: NaiveDate) -> usize {
        let started = self.starts.partition_point(|s| *s <= t);
        let ended = self.ends.partition_point(|e| *e <= t);
        // Every counted end belongs to a start strictly before it.
        started - ended
    }
}
