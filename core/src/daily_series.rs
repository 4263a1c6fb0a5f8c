//! Daily burndown series: expected vs. actual open risks per day.

use crate::{
    classifier::{actual_open, expected_open, OpenCounter},
    peaks::SeriesPoint,
    record::RecordSet,
    timeline::TimelineSpan,
    types::register_date,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    #[serde(with = "register_date")]
    pub date: NaiveDate,
    pub expected: usize,
    pub actual: usize,
}

impl SeriesPoint for DailyPoint {
    fn instant(&self) -> NaiveDate {
        self.date
    }

    fn actual(&self) -> usize {
        self.actual
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySeries {
    pub span: TimelineSpan,
    pub points: Vec<DailyPoint>,
}

impl DailySeries {
    /// Build the series for every day in the record set's span.
    /// `None` is the "no series" result for an empty set.
    pub fn generate(records: &RecordSet) -> Option<Self> {
        let span = TimelineSpan::of(records)?;
        let expected = OpenCounter::expected(records);
        let actual = OpenCounter::actual(records);

        let points: Vec<DailyPoint> = span
            .days()
            .map(|date| DailyPoint {
                date,
                expected: expected.count_at(date),
                actual: actual.count_at(date),
            })
            .collect();

        log::debug!(
            "daily series: {} records over {} days ({} .. {})",
            records.len(),
            points.len(),
            span.start,
            span.end,
        );
        Some(Self { span, points })
    }

    /// Direct per-day predicate scan. O(days x records); kept as the
    /// reference the sweep is checked against.
    pub fn generate_by_scan(records: &RecordSet) -> Option<Self> {
        let span = TimelineSpan::of(records)?;
        let points = span
            .days()
            .map(|date| DailyPoint {
                date,
                expected: records.iter().filter(|r| expected_open(r, date)).count(),
                actual: records.iter().filter(|r| actual_open(r, date)).count(),
            })
            .collect();
        Some(Self { span, points })
    }

    pub fn timeline(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn expected_counts(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.expected).collect()
    }

    pub fn actual_counts(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.actual).collect()
    }

    pub fn point_on(&self, date: NaiveDate) -> Option<&DailyPoint> {
        let offset = (date - self.span.start).num_days();
        usize::try_from(offset).ok().and_then(|i| self.points.get(i))
    }

    pub fn last_day(&self) -> NaiveDate {
        self.span.end
    }
}
