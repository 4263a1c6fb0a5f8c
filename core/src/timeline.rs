//! Timeline bounds and calendar-month arithmetic shared by the daily
//! and monthly series.

use crate::{record::RecordSet, types::register_date};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive day range covered by a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSpan {
    #[serde(with = "register_date")]
    pub start: NaiveDate,
    #[serde(with = "register_date")]
    pub end: NaiveDate,
}

impl TimelineSpan {
    /// From the earliest open date to the latest expected end or closure.
    /// Returns `None` for an empty set.
    ///
    /// When no record has a closure date the end is the latest expected
    /// end. An end before the start (malformed input only) is clamped to
    /// the start so the timeline is never empty.
    pub fn of(records: &RecordSet) -> Option<Self> {
        let start = records.iter().map(|r| r.open_date).min()?;
        let max_expected = records.iter().map(|r| r.expected_end_date).max()?;
        let max_closure = records.iter().filter_map(|r| r.closure_date).max();
        let end = max_closure.map_or(max_expected, |c| c.max(max_expected));

        if end < start {
            log::warn!(
                "timeline end {end} precedes start {start}; clamping to a single day"
            );
        }
        Some(Self {
            start,
            end: end.max(start),
        })
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    pub fn day_count(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn months(&self) -> impl Iterator<Item = YearMonth> {
        let last = YearMonth::of(self.end);
        std::iter::successors(Some(YearMonth::of(self.start)), |m| Some(m.next()))
            .take_while(move |m| *m <= last)
    }
}

/// A calendar month. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// The month's closing instant used for monthly snapshots.
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
