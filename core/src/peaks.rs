//! Peak detection over an actual-open series.
//!
//! A point is a peak when its actual count is at or above
//! `threshold_pct` percent of the series maximum. Compared in integer
//! arithmetic so ties at the threshold are always included.

use crate::{classifier::actual_open, record::{RecordSet, RiskRecord}};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PEAK_THRESHOLD_PCT: u32 = 80;

/// A point of a burndown series the peak detector can scan.
pub trait SeriesPoint {
    /// The instant the counts were evaluated at.
    fn instant(&self) -> NaiveDate;
    fn actual(&self) -> usize;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakSet {
    pub threshold_pct: u32,
    pub max_actual: usize,
    /// `max_actual * threshold_pct / 100`, for display.
    pub threshold: f64,
    /// Ascending series indices.
    pub indices: Vec<usize>,
    /// Index of the highest peak; the earliest one on ties.
    pub highest: Option<usize>,
}

impl PeakSet {
    pub fn empty(threshold_pct: u32) -> Self {
        Self {
            threshold_pct,
            max_actual: 0,
            threshold: 0.0,
            indices: Vec::new(),
            highest: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }
}

/// Flag indices of `actual_counts` at or above the threshold.
/// Empty and all-zero series produce no peaks.
pub fn detect_peaks(actual_counts: &[usize], threshold_pct: u32) -> PeakSet {
    let Some(max_actual) = actual_counts.iter().copied().max() else {
        return PeakSet::empty(threshold_pct);
    };
    if max_actual == 0 {
        return PeakSet::empty(threshold_pct);
    }

    let bar = max_actual as u128 * threshold_pct as u128;
    let indices: Vec<usize> = actual_counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count as u128 * 100 >= bar)
        .map(|(i, _)| i)
        .collect();
    let highest = actual_counts.iter().position(|&c| c == max_actual);

    PeakSet {
        threshold_pct,
        max_actual,
        threshold: max_actual as f64 * threshold_pct as f64 / 100.0,
        indices,
        highest,
    }
}

pub fn detect_series_peaks<P: SeriesPoint>(points: &[P], threshold_pct: u32) -> PeakSet {
    let counts: Vec<usize> = points.iter().map(SeriesPoint::actual).collect();
    detect_peaks(&counts, threshold_pct)
}

/// The instant of the highest flagged peak and the records actually
/// open at it.
pub fn highest_peak_records<'a, P: SeriesPoint>(
    records: &'a RecordSet,
    points: &[P],
    peaks: &PeakSet,
) -> Option<(NaiveDate, Vec<&'a RiskRecord>)> {
    let instant = points.get(peaks.highest?)?.instant();
    let open = records.iter().filter(|r| actual_open(r, instant)).collect();
    Some((instant, open))
}
