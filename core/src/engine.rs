//! The burndown engine: one rendering cycle over a record set.
//!
//! ORDER:
//!   1. Daily series        (interval classifier via sweep counter)
//!   2. Daily peaks         (over the daily actual counts)
//!   3. Monthly series      (month-end snapshots)
//!   4. Monthly peaks       (over the month-end actual counts)
//!   5. Summary + drill-downs
//!
//! RULES:
//!   - The engine never mutates or caches the record set.
//!   - Role filtering happens before the engine is called.
//!   - An empty record set yields no report, not an error.

use crate::{
    config::RegisterConfig,
    daily_series::DailySeries,
    drilldown::{DrillDown, DrillDownRow},
    monthly_series::MonthlySeries,
    peaks::{detect_series_peaks, highest_peak_records, PeakSet},
    record::RecordSet,
    summary::RegisterSummary,
    types::register_date,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakDrillDown {
    #[serde(with = "register_date")]
    pub date: NaiveDate,
    pub actual_open: usize,
    pub rows: Vec<DrillDownRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurndownReport {
    pub summary: RegisterSummary,
    pub daily: DailySeries,
    pub daily_peaks: PeakSet,
    pub monthly: MonthlySeries,
    pub monthly_peaks: PeakSet,
    /// Risks open at the highest daily peak.
    pub peak_drilldown: Option<PeakDrillDown>,
    pub drilldown: DrillDown,
}

pub struct BurndownEngine {
    config: RegisterConfig,
}

impl BurndownEngine {
    pub fn new(config: RegisterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    /// Build the full report. `drilldown_date` defaults to the last day
    /// of the timeline. `None` when the record set is empty.
    pub fn report(
        &self,
        records: &RecordSet,
        drilldown_date: Option<NaiveDate>,
    ) -> Option<BurndownReport> {
        let pct = self.config.peak_threshold_pct;

        let daily = DailySeries::generate(records)?;
        let daily_peaks = detect_series_peaks(&daily.points, pct);
        let monthly = MonthlySeries::generate(records)?;
        let monthly_peaks = detect_series_peaks(&monthly.points, pct);

        let peak_drilldown = highest_peak_records(records, &daily.points, &daily_peaks).map(
            |(date, open)| PeakDrillDown {
                date,
                actual_open: open.len(),
                rows: open.into_iter().map(DrillDownRow::from).collect(),
            },
        );

        let date = drilldown_date.unwrap_or_else(|| daily.last_day());
        let drilldown = DrillDown::on(records, date);

        log::debug!(
            "report: {} days, {} daily peaks (max {}), {} months, {} open on {}",
            daily.points.len(),
            daily_peaks.len(),
            daily_peaks.max_actual,
            monthly.points.len(),
            drilldown.rows.len(),
            date,
        );

        Some(BurndownReport {
            summary: RegisterSummary::of(records, &self.config.high_priority_levels),
            daily,
            daily_peaks,
            monthly,
            monthly_peaks,
            peak_drilldown,
            drilldown,
        })
    }

    /// Drill down on any date without building a report.
    pub fn drill_down(&self, records: &RecordSet, date: NaiveDate) -> DrillDown {
        DrillDown::on(records, date)
    }
}
