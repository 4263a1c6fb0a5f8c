//! Point-in-time drill-down: which risks were open on a given date.

use crate::{
    classifier::{actual_open, expected_open},
    record::{RecordSet, RiskRecord},
    types::register_date,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Records actually open on `t`. Any date is valid; outside the
/// register's span the result is simply empty.
pub fn open_on(records: &RecordSet, t: NaiveDate) -> Vec<&RiskRecord> {
    records.iter().filter(|r| actual_open(r, t)).collect()
}

/// Records planned to still be open on `t`.
pub fn expected_open_on(records: &RecordSet, t: NaiveDate) -> Vec<&RiskRecord> {
    records.iter().filter(|r| expected_open(r, t)).collect()
}

/// The columns shown in a drill-down table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillDownRow {
    pub id: String,
    pub description: String,
    pub risk_type: String,
    pub priority: String,
    pub owner: String,
    pub probability: String,
    pub impact: String,
}

impl From<&RiskRecord> for DrillDownRow {
    fn from(r: &RiskRecord) -> Self {
        Self {
            id: r.id.clone(),
            description: r.description.clone(),
            risk_type: r.risk_type.clone(),
            priority: r.priority.clone(),
            owner: r.owner.clone(),
            probability: r.probability.clone(),
            impact: r.impact.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillDown {
    #[serde(with = "register_date")]
    pub date: NaiveDate,
    pub rows: Vec<DrillDownRow>,
}

impl DrillDown {
    pub fn on(records: &RecordSet, date: NaiveDate) -> Self {
        Self {
            date,
            rows: open_on(records, date).into_iter().map(DrillDownRow::from).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
