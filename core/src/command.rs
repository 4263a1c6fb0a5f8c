use crate::{
    error::{BurndownError, BurndownResult},
    record::RiskRecord,
    role::Role,
    types::{register_date, register_date_opt},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The add-risk form as submitted. Dates travel as `DD-Mon-YY` text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRisk {
    pub id: String,
    pub description: String,
    #[serde(default, with = "register_date_opt")]
    pub open_date: Option<NaiveDate>,
    #[serde(default, with = "register_date_opt")]
    pub expected_end_date: Option<NaiveDate>,
    #[serde(default, with = "register_date_opt")]
    pub closure_date: Option<NaiveDate>,
    /// Left empty, the submitting role's default type is used.
    #[serde(default)]
    pub risk_type: String,
    #[serde(default)]
    pub probability: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub priority: String,
    pub owner: String,
    #[serde(default)]
    pub action_plan: String,
}

impl NewRisk {
    /// Check required form fields and build the record.
    pub fn into_record(self) -> BurndownResult<RiskRecord> {
        let missing = |field: &'static str| BurndownError::MissingField {
            record_id: self.id.clone(),
            field,
        };
        if self.id.trim().is_empty() {
            return Err(missing("id"));
        }
        if self.description.trim().is_empty() {
            return Err(missing("description"));
        }
        if self.owner.trim().is_empty() {
            return Err(missing("owner"));
        }
        let open_date = self.open_date.ok_or_else(|| missing("open_date"))?;
        let expected_end_date = self
            .expected_end_date
            .ok_or_else(|| missing("expected_end_date"))?;

        Ok(RiskRecord {
            id: self.id.trim().to_string(),
            open_date,
            expected_end_date,
            closure_date: self.closure_date,
            risk_type: self.risk_type,
            probability: self.probability,
            impact: self.impact,
            difficulty: self.difficulty,
            priority: self.priority,
            owner: self.owner,
            description: self.description,
            action_plan: self.action_plan,
        })
    }

    /// As [`NewRisk::into_record`], filling a blank risk type from `role`.
    pub fn into_record_for(mut self, role: Role) -> BurndownResult<RiskRecord> {
        if self.risk_type.trim().is_empty() {
            self.risk_type = role.default_risk_type().to_string();
        }
        self.into_record()
    }
}

/// Requests a presentation layer can send to the register.
/// Variants are added over time, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum RegisterCommand {
    GetReport {
        #[serde(default, with = "register_date_opt")]
        date: Option<NaiveDate>,
    },
    DrillDown {
        #[serde(with = "register_date")]
        date: NaiveDate,
    },
    AddRisk {
        risk: NewRisk,
    },
    Quit,
}
