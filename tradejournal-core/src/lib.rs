//! Trade journal streak analysis.
//!
//! Consumes journal records (date + signed percentage return) and produces
//! win/loss streaks, transition buckets, a streak length distribution and a
//! short list of rule-based insights. The host owns storage, rendering and
//! deciding when to re-run the analysis.

pub mod analysis;
pub mod config;
pub mod domain;
pub mod fingerprint;
pub mod sample;

pub use analysis::{analyze, AnalysisResult, Analyzer};
pub use config::{AnalyzerConfig, ConfigError, InsightThresholds};
pub use domain::{AnalyzedTrade, Outcome, RecordError, TradeLike, TradeRecord};
