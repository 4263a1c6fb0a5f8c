use burndown_core::{
    config::RegisterConfig,
    daily_series::DailySeries,
    generator::generate_register,
    record::{RecordSet, RiskRecord},
};
use chrono::NaiveDate;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// One risk, planned 01-Jan to 10-Jan, never closed.
#[test]
fn single_open_risk_burns_down_on_plan_but_not_in_reality() {
    let records = RecordSet::new(vec![RiskRecord::new(
        "R1",
        d(2024, 1, 1),
        d(2024, 1, 10),
        None,
    )]);

    let series = DailySeries::generate(&records).expect("non-empty set has a series");

    assert_eq!(series.points.len(), 10);
    assert_eq!(series.timeline().first(), Some(&d(2024, 1, 1)));
    assert_eq!(series.timeline().last(), Some(&d(2024, 1, 10)));

    let mut expected = vec![1; 9];
    expected.push(0);
    assert_eq!(series.expected_counts(), expected);
    assert_eq!(series.actual_counts(), vec![1; 10]);
}

/// Two risks opened together; one closes on 05-Feb, one never does.
#[test]
fn mid_series_counts_split_expected_and_actual() {
    let records = RecordSet::new(vec![
        RiskRecord::new("A", d(2024, 2, 1), d(2024, 2, 20), Some(d(2024, 2, 5))),
        RiskRecord::new("B", d(2024, 2, 1), d(2024, 2, 20), None),
    ]);

    let series = DailySeries::generate(&records).unwrap();
    let on_10th = series.point_on(d(2024, 2, 10)).expect("10-Feb is in range");

    assert_eq!(on_10th.expected, 2);
    assert_eq!(on_10th.actual, 1);
    assert_eq!(series.last_day(), d(2024, 2, 20));
}

#[test]
fn empty_record_set_has_no_series() {
    assert!(DailySeries::generate(&RecordSet::default()).is_none());
    assert!(DailySeries::generate_by_scan(&RecordSet::default()).is_none());
}

/// A closure after every planned end extends the timeline to it.
#[test]
fn late_closure_extends_timeline() {
    let records = RecordSet::new(vec![
        RiskRecord::new("A", d(2024, 1, 1), d(2024, 1, 5), Some(d(2024, 1, 12))),
        RiskRecord::new("B", d(2024, 1, 3), d(2024, 1, 8), None),
    ]);

    let series = DailySeries::generate(&records).unwrap();
    assert_eq!(series.last_day(), d(2024, 1, 12));
    assert_eq!(series.points.len(), 12);
}

/// Every record opens and is planned to close on the same day.
#[test]
fn degenerate_single_day_timeline() {
    let records = RecordSet::new(vec![
        RiskRecord::new("A", d(2024, 5, 1), d(2024, 5, 1), None),
        RiskRecord::new("B", d(2024, 5, 1), d(2024, 5, 1), None),
    ]);

    let series = DailySeries::generate(&records).unwrap();
    assert_eq!(series.points.len(), 1);
    assert_eq!(series.points[0].expected, 0);
    assert_eq!(series.points[0].actual, 2);
}

/// Malformed input (plan ends before open) must not crash.
#[test]
fn inverted_span_clamps_to_one_day() {
    let records = RecordSet::new(vec![RiskRecord::new(
        "X",
        d(2024, 5, 10),
        d(2024, 5, 1),
        None,
    )]);

    let series = DailySeries::generate(&records).unwrap();
    assert_eq!(series.points.len(), 1);
    assert_eq!(series.points[0].date, d(2024, 5, 10));
    assert_eq!(series.points[0].expected, 0);
    assert_eq!(series.points[0].actual, 1);
}

#[test]
fn generation_is_idempotent() {
    let records = generate_register(11, 120, d(2024, 1, 1), &RegisterConfig::default_test());

    let a = DailySeries::generate(&records).unwrap();
    let b = DailySeries::generate(&records).unwrap();
    assert_eq!(a, b, "same record set must yield identical series");
}

/// The sweep counter must agree with the direct predicate scan,
/// including records with inverted or zero-width intervals.
#[test]
fn sweep_matches_direct_scan() {
    let config = RegisterConfig::default_test();
    for seed in [1u64, 42, 0xBEEF, 2024] {
        let mut records = generate_register(seed, 150, d(2024, 1, 1), &config).into_records();
        records.push(RiskRecord::new("bad-plan", d(2024, 6, 1), d(2024, 5, 1), None));
        records.push(RiskRecord::new("early-close", d(2024, 6, 1), d(2024, 7, 1), Some(d(2024, 5, 20))));
        records.push(RiskRecord::new("zero", d(2024, 3, 3), d(2024, 3, 3), Some(d(2024, 3, 3))));
        let records = RecordSet::new(records);

        let sweep = DailySeries::generate(&records).unwrap();
        let scan = DailySeries::generate_by_scan(&records).unwrap();
        assert_eq!(sweep, scan, "sweep diverged from scan for seed {seed}");
    }
}
