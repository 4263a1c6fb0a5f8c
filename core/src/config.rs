use crate::{
    error::{BurndownError, BurndownResult},
    peaks::DEFAULT_PEAK_THRESHOLD_PCT,
    role::Role,
    types::REGISTER_DATE_FORMAT,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterConfig {
    /// SQLite file holding the register.
    pub register_db: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_peak_threshold_pct")]
    pub peak_threshold_pct: u32,
    #[serde(default = "default_technical_risk_type")]
    pub technical_risk_type: String,
    /// Username → role. Authentication happens elsewhere.
    #[serde(default)]
    pub users: HashMap<String, Role>,
    pub risk_types: Vec<String>,
    pub probability_levels: Vec<String>,
    pub impact_levels: Vec<String>,
    pub difficulty_levels: Vec<String>,
    pub priority_levels: Vec<String>,
    #[serde(default = "default_high_priority_levels")]
    pub high_priority_levels: Vec<String>,
}

fn default_date_format() -> String {
    REGISTER_DATE_FORMAT.to_string()
}

fn default_peak_threshold_pct() -> u32 {
    DEFAULT_PEAK_THRESHOLD_PCT
}

fn default_technical_risk_type() -> String {
    "Technical".to_string()
}

fn default_high_priority_levels() -> Vec<String> {
    vec!["High".into(), "Critical".into()]
}

fn levels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl RegisterConfig {
    /// Load from `<data_dir>/register_config.json`.
    /// In tests, use RegisterConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/register_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: RegisterConfig = serde_json::from_str(&content)?;

        if config.date_format != REGISTER_DATE_FORMAT {
            anyhow::bail!(
                "{path}: date_format must be {REGISTER_DATE_FORMAT}, got {}",
                config.date_format
            );
        }
        if config.peak_threshold_pct == 0 || config.peak_threshold_pct > 100 {
            anyhow::bail!(
                "{path}: peak_threshold_pct must be in 1..=100, got {}",
                config.peak_threshold_pct
            );
        }
        log::info!("Loaded register config from {path} ({} users)", config.users.len());
        Ok(config)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        let mut users = HashMap::new();
        users.insert("tech_manager".to_string(), Role::Technical);
        users.insert("upper_manager".to_string(), Role::Upper);

        Self {
            register_db: ":memory:".into(),
            date_format: default_date_format(),
            peak_threshold_pct: DEFAULT_PEAK_THRESHOLD_PCT,
            technical_risk_type: default_technical_risk_type(),
            users,
            risk_types: levels(&["Quality", "External", "Cost", "Technical"]),
            probability_levels: levels(&["Low", "Medium", "High", "Very High"]),
            impact_levels: levels(&["Low", "Medium", "High", "Very High"]),
            difficulty_levels: levels(&["Low", "Medium", "High", "Very High"]),
            priority_levels: levels(&["Low", "Medium", "High", "Critical"]),
            high_priority_levels: default_high_priority_levels(),
        }
    }

    pub fn role_for_user(&self, username: &str) -> BurndownResult<Role> {
        self.users
            .get(username)
            .copied()
            .ok_or_else(|| BurndownError::UnknownUser {
                username: username.to_string(),
            })
    }
}
