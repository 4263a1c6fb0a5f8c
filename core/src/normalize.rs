//! Record set normalizer: spreadsheet rows to validated records.
//!
//! Column headers are matched to canonical fields by case-insensitive
//! substring against an alias list; the first header that matches, in the
//! sheet's column order, wins.
//! Canonical fields with no matching header are reported and left absent.
//! Rows missing a required date are excluded and reported, never dropped
//! silently.

use crate::{
    error::BurndownResult,
    record::{RawRiskRecord, RecordSet},
    types::parse_register_date,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One spreadsheet row keyed by its original header text, in column order.
pub type RawRow = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    RiskId,
    Description,
    OpenDate,
    ExpectedEndDate,
    ClosureDate,
    RiskType,
    Probability,
    Impact,
    Difficulty,
    Priority,
    ActionPlan,
    Owner,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 12] = [
        CanonicalField::RiskId,
        CanonicalField::Description,
        CanonicalField::OpenDate,
        CanonicalField::ExpectedEndDate,
        CanonicalField::ClosureDate,
        CanonicalField::RiskType,
        CanonicalField::Probability,
        CanonicalField::Impact,
        CanonicalField::Difficulty,
        CanonicalField::Priority,
        CanonicalField::ActionPlan,
        CanonicalField::Owner,
    ];

    /// Header written when the register is exported.
    pub fn header(&self) -> &'static str {
        match self {
            CanonicalField::RiskId          => "Risk ID",
            CanonicalField::Description     => "Risk Description",
            CanonicalField::OpenDate        => "Risk Open Date",
            CanonicalField::ExpectedEndDate => "Expected End Date (DD-MMM-YY)",
            CanonicalField::ClosureDate     => "Closure Date (DD-MMM-YY)",
            CanonicalField::RiskType        => "Risk Type",
            CanonicalField::Probability     => "Probability",
            CanonicalField::Impact          => "Impact",
            CanonicalField::Difficulty      => "Difficulty",
            CanonicalField::Priority        => "Priority",
            CanonicalField::ActionPlan      => "Action Plan",
            CanonicalField::Owner           => "Owner",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::RiskId          => &["Risk ID", "risk_id", "ID"],
            CanonicalField::Description     => &["Risk Description", "Description"],
            CanonicalField::OpenDate        => &["Risk Open Date", "Open Date"],
            CanonicalField::ExpectedEndDate => &["Expected End Date"],
            CanonicalField::ClosureDate     => &["Closure Date"],
            CanonicalField::RiskType        => &["Risk Type", "Type"],
            CanonicalField::Probability     => &["Probability"],
            CanonicalField::Impact          => &["Impact"],
            CanonicalField::Difficulty      => &["Difficulty"],
            CanonicalField::Priority        => &["Priority"],
            CanonicalField::ActionPlan      => &["Action Plan"],
            CanonicalField::Owner           => &["Owner"],
        }
    }

    fn matches(&self, header: &str) -> bool {
        let header = header.to_lowercase();
        self.aliases()
            .iter()
            .any(|alias| header.contains(&alias.to_lowercase()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub columns: BTreeMap<CanonicalField, String>,
    pub missing: Vec<CanonicalField>,
}

impl ColumnMapping {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    fn text(&self, row: &RawRow, field: CanonicalField) -> Option<String> {
        let header = self.columns.get(&field)?;
        match row.get(header)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.trim().to_string()),
            other => Some(other.to_string()),
        }
    }
}

pub fn map_columns<'a, I>(headers: I) -> ColumnMapping
where
    I: IntoIterator<Item = &'a str>,
{
    let headers: Vec<&str> = headers.into_iter().collect();
    let mut mapping = ColumnMapping::default();
    for field in CanonicalField::ALL {
        match headers.iter().find(|h| field.matches(h)) {
            Some(header) => {
                mapping.columns.insert(field, header.to_string());
            }
            None => mapping.missing.push(field),
        }
    }
    mapping
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRow {
    /// Zero-based position in the input.
    pub row: usize,
    pub risk_id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRegister {
    pub records: RecordSet,
    pub rejected: Vec<RejectedRow>,
    pub missing_columns: Vec<CanonicalField>,
}

fn raw_record(mapping: &ColumnMapping, row: &RawRow) -> RawRiskRecord {
    let date = |field| {
        mapping
            .text(row, field)
            .and_then(|s| parse_register_date(&s))
    };
    RawRiskRecord {
        id: mapping.text(row, CanonicalField::RiskId),
        open_date: date(CanonicalField::OpenDate),
        expected_end_date: date(CanonicalField::ExpectedEndDate),
        closure_date: date(CanonicalField::ClosureDate),
        risk_type: mapping.text(row, CanonicalField::RiskType),
        probability: mapping.text(row, CanonicalField::Probability),
        impact: mapping.text(row, CanonicalField::Impact),
        difficulty: mapping.text(row, CanonicalField::Difficulty),
        priority: mapping.text(row, CanonicalField::Priority),
        owner: mapping.text(row, CanonicalField::Owner),
        description: mapping.text(row, CanonicalField::Description),
        action_plan: mapping.text(row, CanonicalField::ActionPlan),
    }
}

/// Normalize raw rows into a record set plus the rows that were excluded.
pub fn normalize(rows: &[RawRow]) -> NormalizedRegister {
    let mut headers: Vec<&str> = Vec::new();
    for header in rows.iter().flat_map(|row| row.keys()) {
        if !headers.contains(&header.as_str()) {
            headers.push(header);
        }
    }
    let mapping = map_columns(headers);

    if !mapping.is_complete() && !rows.is_empty() {
        let names: Vec<&str> = mapping.missing.iter().map(|f| f.header()).collect();
        log::warn!("Missing columns: {}", names.join(", "));
    }

    let mut records = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let raw = raw_record(&mapping, row);
        let risk_id = raw.id.clone();
        match raw.validate() {
            Ok(record) => records.push(record),
            Err(e) => {
                log::warn!("row {i} excluded: {e}");
                rejected.push(RejectedRow {
                    row: i,
                    risk_id,
                    reason: e.to_string(),
                });
            }
        }
    }

    log::info!(
        "Normalized {} risks ({} rows excluded)",
        records.len(),
        rejected.len()
    );
    NormalizedRegister {
        records: RecordSet::new(records),
        rejected,
        missing_columns: mapping.missing,
    }
}

/// Normalize a JSON array of row objects.
pub fn normalize_json(json: &str) -> BurndownResult<NormalizedRegister> {
    let rows: Vec<RawRow> = serde_json::from_str(json)?;
    Ok(normalize(&rows))
}
