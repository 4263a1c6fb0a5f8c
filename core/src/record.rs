//! Risk records and the record set the analytics operate on.
//!
//! A `RiskRecord` always carries both required dates. Anything that might
//! be missing one lives as a `RawRiskRecord` until `validate()` succeeds.

use crate::{
    error::{BurndownError, BurndownResult},
    types::{register_date, register_date_opt, RiskId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRecord {
    pub id: RiskId,
    #[serde(with = "register_date")]
    pub open_date: NaiveDate,
    #[serde(with = "register_date")]
    pub expected_end_date: NaiveDate,
    /// Absent means still open.
    #[serde(default, with = "register_date_opt")]
    pub closure_date: Option<NaiveDate>,
    pub risk_type: String,
    pub probability: String,
    pub impact: String,
    pub difficulty: String,
    pub priority: String,
    pub owner: String,
    pub description: String,
    pub action_plan: String,
}

impl RiskRecord {
    /// Minimal record with empty descriptive attributes.
    pub fn new(
        id: impl Into<RiskId>,
        open_date: NaiveDate,
        expected_end_date: NaiveDate,
        closure_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: id.into(),
            open_date,
            expected_end_date,
            closure_date,
            risk_type: String::new(),
            probability: String::new(),
            impact: String::new(),
            difficulty: String::new(),
            priority: String::new(),
            owner: String::new(),
            description: String::new(),
            action_plan: String::new(),
        }
    }

    pub fn with_risk_type(mut self, risk_type: impl Into<String>) -> Self {
        self.risk_type = risk_type.into();
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closure_date.is_some()
    }
}

/// A record as it arrives from a spreadsheet row or a database row,
/// before the required dates are known to be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRiskRecord {
    pub id: Option<String>,
    #[serde(default, with = "register_date_opt")]
    pub open_date: Option<NaiveDate>,
    #[serde(default, with = "register_date_opt")]
    pub expected_end_date: Option<NaiveDate>,
    #[serde(default, with = "register_date_opt")]
    pub closure_date: Option<NaiveDate>,
    pub risk_type: Option<String>,
    pub probability: Option<String>,
    pub impact: Option<String>,
    pub difficulty: Option<String>,
    pub priority: Option<String>,
    pub owner: Option<String>,
    pub description: Option<String>,
    pub action_plan: Option<String>,
}

impl RawRiskRecord {
    /// Promote to a `RiskRecord`, failing on the first missing required date.
    pub fn validate(self) -> BurndownResult<RiskRecord> {
        let id = self.id.unwrap_or_default();
        let open_date = self.open_date.ok_or_else(|| BurndownError::MissingField {
            record_id: id.clone(),
            field: "open_date",
        })?;
        let expected_end_date =
            self.expected_end_date
                .ok_or_else(|| BurndownError::MissingField {
                    record_id: id.clone(),
                    field: "expected_end_date",
                })?;

        Ok(RiskRecord {
            id,
            open_date,
            expected_end_date,
            closure_date: self.closure_date,
            risk_type: self.risk_type.unwrap_or_default(),
            probability: self.probability.unwrap_or_default(),
            impact: self.impact.unwrap_or_default(),
            difficulty: self.difficulty.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            owner: self.owner.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            action_plan: self.action_plan.unwrap_or_default(),
        })
    }
}

/// An unordered collection of validated records. Never mutated by the
/// analytics; every series is derived fresh from a borrowed set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<RiskRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<RiskRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RiskRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RiskRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<RiskRecord> {
        self.records
    }
}

impl From<Vec<RiskRecord>> for RecordSet {
    fn from(records: Vec<RiskRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<RiskRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = RiskRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a RiskRecord;
    type IntoIter = std::slice::Iter<'a, RiskRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
