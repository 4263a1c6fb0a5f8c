//! Synthetic risk registers for demos and tests.

use crate::{
    config::RegisterConfig,
    record::{RecordSet, RiskRecord},
    rng::RegisterRng,
};
use chrono::{Duration, NaiveDate};

const OPEN_WINDOW_DAYS: i64 = 365;
const MIN_PLANNED_DAYS: i64 = 7;
const MAX_PLANNED_DAYS: i64 = 120;
const CLOSED_SHARE: f64 = 0.65;

/// Generate `count` risks opened within a year of `start`.
///
/// About two thirds are closed, some early and some late against plan.
/// Classification attributes are drawn from the config's option lists.
pub fn generate_register(
    seed: u64,
    count: usize,
    start: NaiveDate,
    config: &RegisterConfig,
) -> RecordSet {
    let mut rng = RegisterRng::new(seed);
    (0..count)
        .map(|i| {
            let open_date = start + Duration::days(rng.next_in_range(0, OPEN_WINDOW_DAYS));
            let planned = rng.next_in_range(MIN_PLANNED_DAYS, MAX_PLANNED_DAYS);
            let expected_end_date = open_date + Duration::days(planned);
            let closure_date = if rng.chance(CLOSED_SHARE) {
                // Between a quarter of plan early and half of plan late.
                let actual = rng.next_in_range(planned * 3 / 4, planned * 3 / 2).max(1);
                Some(open_date + Duration::days(actual))
            } else {
                None
            };

            RiskRecord {
                id: format!("R-{:04}", i + 1),
                open_date,
                expected_end_date,
                closure_date,
                risk_type: rng.pick(&config.risk_types).to_string(),
                probability: rng.pick(&config.probability_levels).to_string(),
                impact: rng.pick(&config.impact_levels).to_string(),
                difficulty: rng.pick(&config.difficulty_levels).to_string(),
                priority: rng.pick(&config.priority_levels).to_string(),
                owner: format!("owner-{}", rng.next_u64_below(8) + 1),
                description: format!("Synthetic risk {}", i + 1),
                action_plan: String::new(),
            }
        })
        .collect()
}
