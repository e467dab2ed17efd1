use crate::error::AdvisorError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Advisor configuration. Every field has a default, so a partial TOML file is fine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub scoring: ScoringConfig,
    pub similarity: SimilarityConfig,
    pub feedback: FeedbackConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Section weights and result-size limits for one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub symptom_weight: f64,
    pub goal_weight: f64,
    pub lifestyle_weight: f64,
    pub max_results: usize,
    /// Below this many primary picks, backfill by effectiveness
    pub min_results: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            symptom_weight: 0.5,
            goal_weight: 0.3,
            lifestyle_weight: 0.2,
            max_results: 5,
            min_results: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Minimum profile similarity for a past session to count
    pub threshold: f64,
    /// Fewer history entries than this: no adjustment at all
    pub min_history: usize,
    /// Largest relative score change, either direction
    pub max_adjustment: f64,
    /// Most recent entries kept on disk
    pub history_cap: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            threshold: 0.65,
            min_history: 5,
            max_adjustment: 0.15,
            history_cap: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Effectiveness points per rating step away from 3
    pub step: f64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self { step: 2.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl AdvisorConfig {
    /// Parse and validate a TOML config string.
    pub fn from_toml(content: &str) -> Result<Self, AdvisorError> {
        let config: AdvisorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, AdvisorError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| AdvisorError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn to_toml(&self) -> Result<String, AdvisorError> {
        toml::to_string_pretty(self).map_err(|e| AdvisorError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), AdvisorError> {
        let s = &self.scoring;
        if s.symptom_weight <= 0.0 || s.goal_weight <= 0.0 || s.lifestyle_weight < 0.0 {
            return Err(AdvisorError::Config(
                "section weights must be positive".to_string(),
            ));
        }
        if s.max_results == 0 {
            return Err(AdvisorError::Config("max_results must be at least 1".to_string()));
        }
        if s.min_results > s.max_results {
            return Err(AdvisorError::Config(format!(
                "min_results ({}) exceeds max_results ({})",
                s.min_results, s.max_results
            )));
        }
        let sim = &self.similarity;
        if !(0.0..=1.0).contains(&sim.threshold) {
            return Err(AdvisorError::Config(format!(
                "similarity threshold {} outside [0,1]",
                sim.threshold
            )));
        }
        if !(0.0..=1.0).contains(&sim.max_adjustment) {
            return Err(AdvisorError::Config(format!(
                "max_adjustment {} outside [0,1]",
                sim.max_adjustment
            )));
        }
        if self.feedback.step < 0.0 {
            return Err(AdvisorError::Config("feedback step must not be negative".to_string()));
        }
        Ok(())
    }
}

/// Default location of the local store and config.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("supplement-advisor")
}

/// Default config file path inside the user's config dir.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("supplement-advisor")
        .join("config.toml")
}
