//! Monthly aggregation: risks opened per month and month-end snapshots
//! of expected and actual open counts.

use crate::{
    classifier::OpenCounter,
    peaks::SeriesPoint,
    record::RecordSet,
    timeline::{TimelineSpan, YearMonth},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: YearMonth,
    pub opened: usize,
    /// Snapshot at the last calendar day of the month.
    pub expected_open: usize,
    /// Snapshot at the last calendar day of the month.
    pub actual_open: usize,
}

impl SeriesPoint for MonthlyPoint {
    fn instant(&self) -> NaiveDate {
        self.month.last_day()
    }

    fn actual(&self) -> usize {
        self.actual_open
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub points: Vec<MonthlyPoint>,
    /// Mean of `opened` over every month in the timeline, zeros included.
    pub average_opened_per_month: f64,
}

impl MonthlySeries {
    /// `None` is the "no series" result for an empty set.
    pub fn generate(records: &RecordSet) -> Option<Self> {
        let span = TimelineSpan::of(records)?;
        let expected = OpenCounter::expected(records);
        let actual = OpenCounter::actual(records);

        let mut opened_by_month: BTreeMap<YearMonth, usize> = BTreeMap::new();
        for r in records {
            *opened_by_month.entry(YearMonth::of(r.open_date)).or_default() += 1;
        }

        let points: Vec<MonthlyPoint> = span
            .months()
            .map(|month| {
                let snapshot = month.last_day();
                MonthlyPoint {
                    month,
                    opened: opened_by_month.get(&month).copied().unwrap_or(0),
                    expected_open: expected.count_at(snapshot),
                    actual_open: actual.count_at(snapshot),
                }
            })
            .collect();

        let total_opened: usize = points.iter().map(|p| p.opened).sum();
        let average_opened_per_month = if points.is_empty() {
            0.0
        } else {
            total_opened as f64 / points.len() as f64
        };

        log::debug!(
            "monthly series: {} months, {:.2} opened/month",
            points.len(),
            average_opened_per_month,
        );
        Some(Self {
            points,
            average_opened_per_month,
        })
    }

    pub fn timeline(&self) -> Vec<YearMonth> {
        self.points.iter().map(|p| p.month).collect()
    }

    pub fn opened_counts(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.opened).collect()
    }

    pub fn expected_counts(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.expected_open).collect()
    }

    pub fn actual_counts(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.actual_open).collect()
    }
}
