use crate::error::CommitScoreError;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitScoreConfig {
    pub store: Option<StoreConfig>,
    pub source: Option<SourceConfig>,
    pub aggregation: Option<AggregationConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".commitscore/store.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_path")]
    pub path: PathBuf,
}

fn default_source_path() -> PathBuf {
    PathBuf::from("commits")
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    pub window_days: Option<u32>,
    pub top_limit: Option<u32>,
    pub trend_months: Option<u32>,
    pub recent_limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationSettings {
    pub window_days: u32,
    pub top_limit: u32,
    pub trend_months: u32,
    pub recent_limit: u32,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            window_days: 30,
            top_limit: 10,
            trend_months: 12,
            recent_limit: 5,
        }
    }
}

impl CommitScoreConfig {
    pub fn store_path(&self) -> PathBuf {
        self.store
            .as_ref()
            .map(|store| store.path.clone())
            .unwrap_or_else(default_store_path)
    }

    pub fn source_path(&self) -> PathBuf {
        self.source
            .as_ref()
            .map(|source| source.path.clone())
            .unwrap_or_else(default_source_path)
    }

    pub fn aggregation_settings(&self) -> AggregationSettings {
        let defaults = AggregationSettings::default();
        match &self.aggregation {
            Some(aggregation) => AggregationSettings {
                window_days: aggregation.window_days.unwrap_or(defaults.window_days),
                top_limit: aggregation.top_limit.unwrap_or(defaults.top_limit),
                trend_months: aggregation.trend_months.unwrap_or(defaults.trend_months),
                recent_limit: aggregation.recent_limit.unwrap_or(defaults.recent_limit),
            },
            None => defaults,
        }
    }

    pub fn validate(&self) -> Result<(), CommitScoreError> {
        let settings = self.aggregation_settings();
        if settings.window_days == 0 {
            return Err(CommitScoreError::ConfigParse(
                "aggregation.window_days must be greater than 0".to_string(),
            ));
        }
        if settings.top_limit == 0 {
            return Err(CommitScoreError::ConfigParse(
                "aggregation.top_limit must be greater than 0".to_string(),
            ));
        }
        if settings.trend_months == 0 {
            return Err(CommitScoreError::ConfigParse(
                "aggregation.trend_months must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
