//! Analyzer configuration, loadable from TOML.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```toml
//! [insights]
//! strong_recovery = 2.5
//! min_bucket_samples = 3
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub insights: InsightThresholds,
}

/// Gates and tone thresholds for insight generation. Returns are in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    /// Average win-after-loss return above which recovery is "strong".
    pub strong_recovery: f64,
    /// Average loss-after-win return at or below which give-back is "significant".
    pub post_win_give_back: f64,
    /// Longest streak (either side) needed for the longest-streak insight.
    pub min_longest_streak: usize,
    /// Total streak count needed for the optimal-length insight.
    pub min_streaks_for_length: usize,
    /// Streaks a length bucket needs before it can be ranked.
    pub min_bucket_samples: usize,
    /// Open streak length needed for the current-streak insight.
    pub min_current_streak: usize,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            strong_recovery: 3.0,
            post_win_give_back: -3.0,
            min_longest_streak: 2,
            min_streaks_for_length: 3,
            min_bucket_samples: 2,
            min_current_streak: 2,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.insights;
        let counts = [
            ("min_longest_streak", t.min_longest_streak),
            ("min_streaks_for_length", t.min_streaks_for_length),
            ("min_bucket_samples", t.min_bucket_samples),
            ("min_current_streak", t.min_current_streak),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be at least 1")));
            }
        }
        if !t.strong_recovery.is_finite() || !t.post_win_give_back.is_finite() {
            return Err(ConfigError::Invalid(
                "return thresholds must be finite".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let c = AnalyzerConfig::default();
        assert_eq!(c.insights.strong_recovery, 3.0);
        assert_eq!(c.insights.post_win_give_back, -3.0);
        assert_eq!(c.insights.min_bucket_samples, 2);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            AnalyzerConfig::from_toml("").unwrap(),
            AnalyzerConfig::default()
        );
    }

    #[test]
    fn partial_override() {
        let c = AnalyzerConfig::from_toml("[insights]\nstrong_recovery = 2.5\n").unwrap();
        assert_eq!(c.insights.strong_recovery, 2.5);
        assert_eq!(c.insights.min_current_streak, 2);
    }

    #[test]
    fn zero_gate_rejected() {
        let err = AnalyzerConfig::from_toml("[insights]\nmin_bucket_samples = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("min_bucket_samples"));
    }

    #[test]
    fn malformed_toml_rejected() {
        let err = AnalyzerConfig::from_toml("[insights\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn from_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[insights]\nmin_current_streak = 4").unwrap();
        let c = AnalyzerConfig::from_file(file.path()).unwrap();
        assert_eq!(c.insights.min_current_streak, 4);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AnalyzerConfig::from_file(Path::new("/nonexistent/journal.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/journal.toml"));
    }
}
