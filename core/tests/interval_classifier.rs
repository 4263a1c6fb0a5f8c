use burndown_core::{
    classifier::{actual_open, expected_open},
    record::RiskRecord,
};
use chrono::{Duration, NaiveDate};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_records() -> Vec<RiskRecord> {
    vec![
        RiskRecord::new("R1", d(2024, 1, 1), d(2024, 1, 10), None),
        RiskRecord::new("R2", d(2024, 1, 5), d(2024, 2, 1), Some(d(2024, 1, 20))),
        RiskRecord::new("R3", d(2024, 1, 5), d(2024, 1, 15), Some(d(2024, 3, 1))),
        RiskRecord::new("R4", d(2024, 2, 1), d(2024, 2, 1), Some(d(2024, 2, 1))),
    ]
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Before its open date a risk is neither expected nor actually open.
#[test]
fn nothing_is_open_before_open_date() {
    for r in sample_records() {
        for back in 1..=30 {
            let t = r.open_date - Duration::days(back);
            assert!(!expected_open(&r, t), "{} expected-open on {t}", r.id);
            assert!(!actual_open(&r, t), "{} actual-open on {t}", r.id);
        }
    }
}

/// Lower bound inclusive, upper bound exclusive.
#[test]
fn expected_bounds_are_half_open() {
    let r = RiskRecord::new("R1", d(2024, 1, 1), d(2024, 1, 10), None);
    assert!(expected_open(&r, r.open_date), "open day must count");
    assert!(expected_open(&r, d(2024, 1, 9)));
    assert!(!expected_open(&r, r.expected_end_date), "end day must not count");
}

#[test]
fn closure_day_is_no_longer_open() {
    let r = RiskRecord::new("R2", d(2024, 1, 5), d(2024, 2, 1), Some(d(2024, 1, 20)));
    assert!(actual_open(&r, d(2024, 1, 19)));
    assert!(!actual_open(&r, d(2024, 1, 20)));
    // Closed early, still expected open until plan end.
    assert!(expected_open(&r, d(2024, 1, 25)));
}

/// Without a closure date a risk stays open forever once opened.
#[test]
fn unclosed_risk_never_closes() {
    let r = RiskRecord::new("R1", d(2024, 1, 1), d(2024, 1, 10), None);
    let mut t = d(2023, 12, 1);
    while t < d(2026, 1, 1) {
        assert_eq!(actual_open(&r, t), r.open_date <= t, "mismatch on {t}");
        t += Duration::days(7);
    }
}

/// A late closure keeps the risk actually open past its planned end.
#[test]
fn late_closure_outlives_plan() {
    let r = RiskRecord::new("R3", d(2024, 1, 5), d(2024, 1, 15), Some(d(2024, 3, 1)));
    assert!(!expected_open(&r, d(2024, 2, 1)));
    assert!(actual_open(&r, d(2024, 2, 1)));
}

/// Zero-width intervals are never open.
#[test]
fn same_day_open_and_close_never_counts() {
    let r = RiskRecord::new("R4", d(2024, 2, 1), d(2024, 2, 1), Some(d(2024, 2, 1)));
    assert!(!expected_open(&r, d(2024, 2, 1)));
    assert!(!actual_open(&r, d(2024, 2, 1)));
}
