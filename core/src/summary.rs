use crate::record::RecordSet;
use serde::{Deserialize, Serialize};

/// Headline counts shown above the charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterSummary {
    pub total: usize,
    /// No closure date recorded.
    pub open: usize,
    pub closed: usize,
    pub high_priority: usize,
}

impl RegisterSummary {
    pub fn of(records: &RecordSet, high_priority_levels: &[String]) -> Self {
        let closed = records.iter().filter(|r| r.is_closed()).count();
        let high_priority = records
            .iter()
            .filter(|r| high_priority_levels.iter().any(|p| *p == r.priority))
            .count();
        Self {
            total: records.len(),
            open: records.len() - closed,
            closed,
            high_priority,
        }
    }
}
