//! Role-based partition applied before any analytics run.
//!
//! The analytics never see a role: callers filter the record set here and
//! hand the result on.

use crate::{
    error::{BurndownError, BurndownResult},
    record::RecordSet,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Sees technical risks only.
    #[serde(rename = "tech")]
    Technical,
    /// Sees the whole register.
    Upper,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Technical => "tech",
            Role::Upper => "upper",
        }
    }

    /// Pre-selected risk type on the add-risk form.
    pub fn default_risk_type(&self) -> &'static str {
        match self {
            Role::Technical => "Technical",
            Role::Upper => "Quality",
        }
    }
}

impl FromStr for Role {
    type Err = BurndownError;

    fn from_str(s: &str) -> BurndownResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tech" | "technical" => Ok(Role::Technical),
            "upper" => Ok(Role::Upper),
            other => Err(BurndownError::UnknownRole { role: other.to_string() }),
        }
    }
}

pub fn partition_for_role(role: Role, records: &RecordSet, technical_type: &str) -> RecordSet {
    match role {
        Role::Technical => records
            .iter()
            .filter(|r| r.risk_type == technical_type)
            .cloned()
            .collect(),
        Role::Upper => records.clone(),
    }
}
